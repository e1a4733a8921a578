//! Almanac Core Library
//!
//! Fetches "today in history" mountaineering events from the club backend and
//! drives the widget that shows them: loading/content/error/empty panels,
//! a local like counter, sharing, date navigation and periodic refresh.

pub mod client;
pub mod config;
pub mod date;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod like;
pub mod panel;
pub mod refresh;
pub mod render;
pub mod share;
pub mod types;
pub mod widget;

// Re-export commonly used items at crate root
pub use client::{HistoryApi, HttpHistoryApi};
pub use config::WidgetConfig;
pub use date::{DateKey, Direction};
pub use endpoint::{DEFAULT_LIST_LIMIT, EventQuery, ListQuery};
pub use error::{AlmanacError, Result};
pub use format::{format_event_list, format_event_readable, format_panel, format_share};
pub use like::LikeCounter;
pub use panel::Panel;
pub use refresh::run_auto_refresh;
pub use render::{BadgeTone, CategoryBadge, RenderedEvent, render};
pub use share::SharePayload;
pub use types::{Category, Envelope, Event, EventList, EventSource};
pub use widget::{HistoryWidget, LoadFuture, LoadOutcome};
