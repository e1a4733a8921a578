use reqwest::Url;

use crate::{
    date::DateKey,
    error::{AlmanacError, Result},
};

pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Which single event to load
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventQuery {
    Today,
    /// Opaque path segment; the backend expects `MM-DD`
    Date(String),
    Random,
}

impl EventQuery {
    pub fn date(date: DateKey) -> Self {
        EventQuery::Date(date.to_string())
    }

    pub fn name(&self) -> String {
        match self {
            EventQuery::Today => "today".to_string(),
            EventQuery::Date(date) => format!("date {date}"),
            EventQuery::Random => "random".to_string(),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url> {
        match self {
            EventQuery::Today => join(base, &["api", "today-in-history"]),
            EventQuery::Date(date) => join(base, &["api", "history", date.as_str()]),
            EventQuery::Random => join(base, &["api", "history", "random"]),
        }
    }
}

/// Which list of events to load
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListQuery {
    Featured,
    Category { category: String, limit: u32 },
    Search { query: String, limit: u32 },
}

impl ListQuery {
    pub fn name(&self) -> String {
        match self {
            ListQuery::Featured => "featured".to_string(),
            ListQuery::Category { category, .. } => format!("category {category}"),
            ListQuery::Search { query, .. } => format!("search {query:?}"),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url> {
        match self {
            ListQuery::Featured => join(base, &["api", "history", "featured"]),
            ListQuery::Category { category, limit } => {
                let mut url = join(base, &["api", "history", "category", category.as_str()])?;
                url.query_pairs_mut()
                    .append_pair("limit", &limit.to_string());
                Ok(url)
            }
            ListQuery::Search { query, limit } => {
                let mut url = join(base, &["api", "history", "search"])?;
                url.query_pairs_mut()
                    .append_pair("q", query)
                    .append_pair("limit", &limit.to_string());
                Ok(url)
            }
        }
    }
}

/// Append percent-encoded path segments to a directory-style base URL
fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AlmanacError::InvalidBaseUrl {
            input: base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
