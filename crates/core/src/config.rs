use std::time::Duration;

use reqwest::Url;

use crate::error::{AlmanacError, Result};

pub const BASE_URL_ENV: &str = "ALMANAC_BASE_URL";
pub const SESSION_ENV: &str = "ALMANAC_SESSION";
pub const REFRESH_SECS_ENV: &str = "ALMANAC_REFRESH_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
/// Six hours, the cadence of the page's auto-refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Clone, Debug)]
pub struct WidgetConfig {
    pub base_url: Url,
    pub refresh_interval: Duration,
    /// Value of the backend's `session` cookie; the API answers 401 without one.
    pub session_cookie: Option<String>,
}

impl WidgetConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            session_cookie: None,
        })
    }

    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Load configuration from `ALMANAC_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let refresh_interval = match lookup(REFRESH_SECS_ENV) {
            Some(raw) => parse_refresh_secs(&raw)?,
            None => DEFAULT_REFRESH_INTERVAL,
        };

        Ok(Self::new(&base_url)?
            .with_refresh_interval(refresh_interval)
            .with_session_cookie(lookup(SESSION_ENV)))
    }

    /// Page the "view more" action points at
    pub fn history_page_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("history");
        }
        url
    }
}

pub fn parse_refresh_secs(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AlmanacError::InvalidRefreshInterval {
            env_var: REFRESH_SECS_ENV.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_base_url(input: &str) -> Result<Url> {
    let invalid = |reason: &str| AlmanacError::InvalidBaseUrl {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(input.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base"));
    }

    // Endpoints are appended as segments, so the base always names a directory.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
