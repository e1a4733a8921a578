use crate::types::{Category, Event, EventSource};

pub const UNKNOWN_YEAR: &str = "?";
pub const UNKNOWN_TITLE: &str = "Neznan dogodek";
pub const NO_DESCRIPTION: &str = "Opis ni na voljo";
pub const UNKNOWN_LOCATION: &str = "Neznana lokacija";
pub const GENERIC_CATEGORY: &str = "Splošno";

/// Badge colour of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Dark,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Primary => "bg-primary",
            BadgeTone::Secondary => "bg-secondary",
            BadgeTone::Success => "bg-success",
            BadgeTone::Danger => "bg-danger",
            BadgeTone::Warning => "bg-warning",
            BadgeTone::Info => "bg-info",
            BadgeTone::Dark => "bg-dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl CategoryBadge {
    pub const GENERIC: CategoryBadge = CategoryBadge {
        label: GENERIC_CATEGORY,
        tone: BadgeTone::Secondary,
    };

    pub fn for_category(category: Option<&Category>) -> Self {
        let (label, tone) = match category {
            Some(Category::FirstAscent) => ("Prvi vzpon", BadgeTone::Primary),
            Some(Category::Tragedy) => ("Tragedija", BadgeTone::Dark),
            Some(Category::Discovery) => ("Odkritje", BadgeTone::Info),
            Some(Category::Achievement) => ("Dosežek", BadgeTone::Success),
            Some(Category::Expedition) => ("Odprava", BadgeTone::Warning),
            Some(Category::Rescue) => ("Reševanje", BadgeTone::Danger),
            Some(Category::Equipment) => ("Oprema", BadgeTone::Info),
            Some(Category::ClubHistory) => ("Zgodovina kluba", BadgeTone::Primary),
            Some(Category::Other(_)) | None => return Self::GENERIC,
        };
        Self { label, tone }
    }
}

/// Display text for every slot of the event template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEvent {
    pub year: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: CategoryBadge,
    /// `None` hides the people row
    pub people: Option<String>,
    /// `None` hides the source row
    pub source: Option<String>,
    pub reference_url: Option<String>,
}

pub fn render(event: &Event) -> RenderedEvent {
    RenderedEvent {
        year: or_default(&event.year, UNKNOWN_YEAR),
        title: or_default(&event.title, UNKNOWN_TITLE),
        description: or_default(&event.description, NO_DESCRIPTION),
        location: or_default(&event.location, UNKNOWN_LOCATION),
        category: CategoryBadge::for_category(event.category.as_ref()),
        people: (!event.people.is_empty()).then(|| event.people.join(", ")),
        source: event.source.as_ref().and_then(source_label),
        reference_url: event.reference_url.clone(),
    }
}

pub fn source_label(source: &EventSource) -> Option<String> {
    match source {
        EventSource::Unknown => None,
        EventSource::AiGenerated => Some("Ustvarjeno z AI".to_string()),
        EventSource::Historical => Some("Zgodovinski vir".to_string()),
        EventSource::Fallback => Some("Privzeto".to_string()),
        EventSource::Other(raw) => Some(raw.clone()),
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_event_gets_placeholders_everywhere() {
        let rendered = render(&Event::default());

        for text in [
            &rendered.year,
            &rendered.title,
            &rendered.description,
            &rendered.location,
        ] {
            assert!(!text.is_empty());
        }
        assert!(!rendered.category.label.is_empty());
        assert_eq!(rendered.year, UNKNOWN_YEAR);
        assert_eq!(rendered.title, UNKNOWN_TITLE);
        assert_eq!(rendered.description, NO_DESCRIPTION);
        assert_eq!(rendered.location, UNKNOWN_LOCATION);
        assert_eq!(rendered.category, CategoryBadge::GENERIC);
        assert!(rendered.people.is_none());
        assert!(rendered.source.is_none());
    }

    #[test]
    fn minimal_event_falls_back_for_optional_slots() {
        let event = Event::from(json!({"year": 1991, "title": "X", "description": "Y"}));
        let rendered = render(&event);

        assert_eq!(rendered.year, "1991");
        assert_eq!(rendered.title, "X");
        assert_eq!(rendered.description, "Y");
        assert_eq!(rendered.category.label, GENERIC_CATEGORY);
        assert_eq!(rendered.category.tone.css_class(), "bg-secondary");
        assert!(rendered.people.is_none());
        assert!(rendered.source.is_none());
    }

    #[test]
    fn year_sent_as_float_renders_without_fraction() {
        let event = Event::from(json!({"year": 1991.0, "title": "X"}));
        assert_eq!(render(&event).year, "1991");
    }

    #[test]
    fn people_are_joined_in_order() {
        let event = Event::from(json!({"people": ["Janez", "Micka", "Tone"]}));
        assert_eq!(render(&event).people.as_deref(), Some("Janez, Micka, Tone"));
    }

    #[test]
    fn known_category_gets_its_badge() {
        let event = Event::from(json!({"category": "rescue"}));
        let badge = render(&event).category;
        assert_eq!(badge.label, "Reševanje");
        assert_eq!(badge.tone, BadgeTone::Danger);
    }

    #[test]
    fn unknown_category_is_generic() {
        let event = Event::from(json!({"category": "paragliding"}));
        assert_eq!(render(&event).category, CategoryBadge::GENERIC);
    }

    #[test]
    fn source_labels() {
        let label = |raw: &str| render(&Event::from(json!({"source": raw}))).source;

        assert_eq!(label("AI-generated").as_deref(), Some("Ustvarjeno z AI"));
        assert_eq!(label("historical").as_deref(), Some("Zgodovinski vir"));
        assert_eq!(label("fallback").as_deref(), Some("Privzeto"));
        assert_eq!(label("archive").as_deref(), Some("archive"));
        assert_eq!(label("unknown"), None);
    }
}
