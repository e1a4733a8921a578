use async_trait::async_trait;
use reqwest::{
    Url,
    header::{ACCEPT, COOKIE},
};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::WidgetConfig,
    endpoint::{EventQuery, ListQuery},
    error::Result,
    types::{Envelope, EventList},
};

/// Backend that serves history events
#[async_trait]
pub trait HistoryApi: Send + Sync + 'static {
    async fn fetch_event(&self, query: &EventQuery) -> Result<Envelope>;

    async fn fetch_events(&self, query: &ListQuery) -> Result<EventList>;
}

pub struct HttpHistoryApi {
    client: reqwest::Client,
    base_url: Url,
    session_cookie: Option<String>,
}

impl HttpHistoryApi {
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("almanac/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a JSON body. The status code is not consulted: the backend reports
    /// "nothing found" as a 404 with a JSON body.
    async fn get_json(&self, url: Url) -> Result<Value> {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, format!("session={cookie}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%url, %status, bytes = body.len(), "history API responded");

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl HistoryApi for HttpHistoryApi {
    async fn fetch_event(&self, query: &EventQuery) -> Result<Envelope> {
        let url = query.url(&self.base_url)?;
        let body = self.get_json(url).await?;
        Envelope::from_value(&query.name(), body)
    }

    async fn fetch_events(&self, query: &ListQuery) -> Result<EventList> {
        let url = query.url(&self.base_url)?;
        let body = self.get_json(url).await?;
        EventList::from_value(&query.name(), body)
    }
}
