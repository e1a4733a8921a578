use crate::render::RenderedEvent;

/// The one visible state of the widget
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Loading,
    Content(Box<RenderedEvent>),
    Error,
    Empty,
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Loading => "loading",
            Panel::Content(_) => "content",
            Panel::Error => "error",
            Panel::Empty => "empty",
        }
    }

    pub fn content(&self) -> Option<&RenderedEvent> {
        match self {
            Panel::Content(rendered) => Some(rendered),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Panel::Loading)
    }
}
