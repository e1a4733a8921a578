use reqwest::Url;

use crate::render::RenderedEvent;

pub const SHARE_SIGNATURE: &str = "Vir: Planinsko društvo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Url,
}

impl SharePayload {
    pub fn new(rendered: &RenderedEvent, url: Url) -> Self {
        Self {
            title: format!("Na današnji dan - {}", rendered.title),
            text: format!(
                "{} - {}\n\n{}\n\n{}",
                rendered.year, rendered.title, rendered.description, SHARE_SIGNATURE
            ),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{render::render, types::Event};

    fn url() -> Url {
        Url::parse("http://localhost:5000/").unwrap()
    }

    #[test]
    fn composes_title_and_text() {
        let event = Event::from(json!({
            "year": 1778,
            "title": "Prvi vzpon na Triglav",
            "description": "Štirje srčni možje"
        }));
        let payload = SharePayload::new(&render(&event), url());

        assert_eq!(payload.title, "Na današnji dan - Prvi vzpon na Triglav");
        assert_eq!(
            payload.text,
            "1778 - Prvi vzpon na Triglav\n\nŠtirje srčni možje\n\nVir: Planinsko društvo"
        );
        assert_eq!(payload.url, url());
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let payload = SharePayload::new(&render(&Event::default()), url());
        assert_eq!(
            payload.text,
            "? - Neznan dogodek\n\nOpis ni na voljo\n\nVir: Planinsko društvo"
        );
    }
}
