use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use reqwest::Url;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    client::HistoryApi,
    date::{DateKey, Direction},
    endpoint::EventQuery,
    error::Result,
    like::LikeCounter,
    panel::Panel,
    render::{RenderedEvent, render},
    share::SharePayload,
    types::{Envelope, Event},
};

/// What a call to [`HistoryWidget::load`] ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered { title: String },
    Empty,
    Failed { reason: String },
    /// Another load was in flight; no request was issued
    Skipped,
}

pub type LoadFuture = Pin<Box<dyn Future<Output = LoadOutcome> + Send>>;

#[derive(Default)]
struct WidgetState {
    current: Option<Event>,
    rendered: Option<RenderedEvent>,
    shown_date: Option<DateKey>,
    likes: LikeCounter,
}

/// Releases the in-flight flag when the load finishes, whatever the path
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(Arc::clone(flag)))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct HistoryWidget<A> {
    instance_id: Uuid,
    api: Arc<A>,
    page_url: Url,
    loading: Arc<AtomicBool>,
    panel: watch::Sender<Panel>,
    state: Mutex<WidgetState>,
}

impl<A: HistoryApi> HistoryWidget<A> {
    pub fn new(api: A, page_url: Url) -> Self {
        Self::with_shared_api(Arc::new(api), page_url)
    }

    pub fn with_shared_api(api: Arc<A>, page_url: Url) -> Self {
        let (panel, _) = watch::channel(Panel::Loading);
        Self {
            instance_id: Uuid::new_v4(),
            api,
            page_url,
            loading: Arc::new(AtomicBool::new(false)),
            panel,
            state: Mutex::new(WidgetState::default()),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn panel(&self) -> Panel {
        self.panel.borrow().clone()
    }

    /// Receiver that sees every panel change, including ones from auto-refresh
    pub fn subscribe(&self) -> watch::Receiver<Panel> {
        self.panel.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Load one event. Returns [`LoadOutcome::Skipped`] without touching the
    /// network when another load is still in flight.
    pub async fn load(&self, query: EventQuery) -> LoadOutcome {
        let Some(in_flight) = self.begin(&query) else {
            return LoadOutcome::Skipped;
        };

        let result = self.api.fetch_event(&query).await;
        let outcome = self.finish(&query, result);
        drop(in_flight);
        outcome
    }

    /// Claim the in-flight flag and show the loading panel right away, then
    /// hand back the request as an owned future. `None` when a load is in flight.
    pub fn start_load(self: &Arc<Self>, query: EventQuery) -> Option<LoadFuture> {
        let in_flight = self.begin(&query)?;
        let widget = Arc::clone(self);

        Some(Box::pin(async move {
            let result = widget.api.fetch_event(&query).await;
            let outcome = widget.finish(&query, result);
            drop(in_flight);
            outcome
        }))
    }

    /// Query for the day before or after the event on display
    pub fn adjacent_query(&self, direction: Direction) -> EventQuery {
        let shown = self.lock_state().shown_date;
        EventQuery::date(shown.unwrap_or_else(DateKey::today).shift(direction))
    }

    pub async fn navigate(&self, direction: Direction) -> LoadOutcome {
        self.load(self.adjacent_query(direction)).await
    }

    /// Add one to the displayed like count. Nothing happens before the first
    /// event has been shown.
    pub fn like(&self) -> Option<u64> {
        let mut state = self.lock_state();
        let title = state.rendered.as_ref()?.title.clone();
        let count = state.likes.increment();
        info!(instance = %self.instance_id, %title, likes = count, "Liked event");
        Some(count)
    }

    /// Like count of the current event, `None` before the first event
    pub fn likes(&self) -> Option<u64> {
        let state = self.lock_state();
        state.current.as_ref().map(|_| state.likes.count())
    }

    pub fn current_event(&self) -> Option<Event> {
        self.lock_state().current.clone()
    }

    pub fn share(&self) -> Option<SharePayload> {
        let state = self.lock_state();
        let rendered = state.rendered.as_ref()?;
        Some(SharePayload::new(rendered, self.page_url.clone()))
    }

    fn begin(&self, query: &EventQuery) -> Option<InFlight> {
        let Some(in_flight) = InFlight::claim(&self.loading) else {
            debug!(instance = %self.instance_id, query = %query.name(), "Load already in flight, ignoring trigger");
            return None;
        };
        self.panel.send_replace(Panel::Loading);
        Some(in_flight)
    }

    fn finish(&self, query: &EventQuery, result: Result<Envelope>) -> LoadOutcome {
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(instance = %self.instance_id, query = %query.name(), error = %e, "Error fetching historical event");
                self.panel.send_replace(Panel::Error);
                return LoadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let event = match envelope {
            Envelope {
                success: true,
                event: Some(event),
                ..
            } => event,
            Envelope { error, .. } => {
                warn!(instance = %self.instance_id, query = %query.name(), reason = error.as_deref().unwrap_or("none given"), "No historical event found");
                self.panel.send_replace(Panel::Empty);
                return LoadOutcome::Empty;
            }
        };

        let rendered = render(&event);
        let title = rendered.title.clone();
        {
            let mut state = self.lock_state();
            state.shown_date = shown_date(query, &event);
            state.likes = LikeCounter::new(event.like_count.unwrap_or(0));
            state.rendered = Some(rendered.clone());
            state.current = Some(event);
        }
        self.panel.send_replace(Panel::Content(Box::new(rendered)));
        info!(instance = %self.instance_id, query = %query.name(), %title, "Loaded historical event");

        LoadOutcome::Rendered { title }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, WidgetState> {
        self.state.lock().expect("HistoryWidget state poisoned")
    }
}

fn shown_date(query: &EventQuery, event: &Event) -> Option<DateKey> {
    if let Some(date) = event.date.as_deref().and_then(|d| d.parse().ok()) {
        return Some(date);
    }
    match query {
        EventQuery::Date(date) => date.parse().ok(),
        EventQuery::Today => Some(DateKey::today()),
        EventQuery::Random => None,
    }
}
