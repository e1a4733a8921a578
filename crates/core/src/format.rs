use crate::{
    panel::Panel,
    render::{RenderedEvent, render},
    share::SharePayload,
    types::Event,
};

pub const EMPTY_MESSAGE: &str = "Za ta dan ni zabeleženega dogodka.";
pub const ERROR_MESSAGE: &str = "Dogodka ni bilo mogoče naložiti.";
pub const LOADING_MESSAGE: &str = "Nalaganje...";

/// Format a rendered event as human-readable markdown
pub fn format_event_readable(rendered: &RenderedEvent, likes: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {} - {}\n\n", rendered.year, rendered.title));

    output.push_str(&format!(
        "**Kategorija:** {} | **Lokacija:** {}\n\n",
        rendered.category.label, rendered.location
    ));

    output.push_str(&rendered.description);
    output.push_str("\n\n");

    if let Some(people) = &rendered.people {
        output.push_str(&format!("**Osebe:** {}\n", people));
    }
    if let Some(source) = &rendered.source {
        output.push_str(&format!("**Vir:** {}\n", source));
    }
    if let Some(reference) = &rendered.reference_url {
        output.push_str(&format!("**Več:** {}\n", reference));
    }

    output.push_str(&format!("\n♥ {}\n", likes));

    output
}

/// Format whatever panel is showing
pub fn format_panel(panel: &Panel, likes: u64) -> String {
    match panel {
        Panel::Loading => format!("{}\n", LOADING_MESSAGE),
        Panel::Content(rendered) => format_event_readable(rendered, likes),
        Panel::Error => format!("{}\n", ERROR_MESSAGE),
        Panel::Empty => format!("{}\n", EMPTY_MESSAGE),
    }
}

/// One line per event: `year  title  [category]`
pub fn format_event_list(events: &[Event]) -> String {
    events
        .iter()
        .map(|event| {
            let rendered = render(event);
            let date = event.date.as_deref().unwrap_or("-----");
            format!(
                "{}  {:>5}  {}  [{}]",
                date, rendered.year, rendered.title, rendered.category.label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_share(payload: &SharePayload) -> String {
    format!("{}\n\n{}\n\n{}\n", payload.title, payload.text, payload.url)
}
