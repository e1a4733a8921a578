//! Wire types for the history API.
//!
//! The backend is loosely typed, so events are read from `serde_json::Value`
//! with truthiness rules: `null`, `false`, `0`, `""` and `NaN` count as absent.
//! Numbers in text slots are shown as text; objects and arrays in scalar slots
//! are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AlmanacError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FirstAscent,
    Tragedy,
    Discovery,
    Achievement,
    Expedition,
    Rescue,
    Equipment,
    ClubHistory,
    Other(String),
}

impl Category {
    pub fn key(&self) -> &str {
        match self {
            Category::FirstAscent => "first_ascent",
            Category::Tragedy => "tragedy",
            Category::Discovery => "discovery",
            Category::Achievement => "achievement",
            Category::Expedition => "expedition",
            Category::Rescue => "rescue",
            Category::Equipment => "equipment",
            Category::ClubHistory => "club_history",
            Category::Other(key) => key,
        }
    }
}

impl From<String> for Category {
    fn from(key: String) -> Self {
        match key.as_str() {
            "first_ascent" => Category::FirstAscent,
            "tragedy" => Category::Tragedy,
            "discovery" => Category::Discovery,
            "achievement" => Category::Achievement,
            "expedition" => Category::Expedition,
            "rescue" => Category::Rescue,
            "equipment" => Category::Equipment,
            "club_history" => Category::ClubHistory,
            _ => Category::Other(key),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.key().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventSource {
    AiGenerated,
    Historical,
    Fallback,
    Unknown,
    Other(String),
}

impl EventSource {
    pub fn key(&self) -> &str {
        match self {
            EventSource::AiGenerated => "AI-generated",
            EventSource::Historical => "historical",
            EventSource::Fallback => "fallback",
            EventSource::Unknown => "unknown",
            EventSource::Other(key) => key,
        }
    }
}

impl From<String> for EventSource {
    fn from(key: String) -> Self {
        match key.as_str() {
            "AI-generated" => EventSource::AiGenerated,
            "historical" => EventSource::Historical,
            "fallback" => EventSource::Fallback,
            "unknown" => EventSource::Unknown,
            _ => EventSource::Other(key),
        }
    }
}

impl From<EventSource> for String {
    fn from(source: EventSource) -> Self {
        source.key().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Event {
    pub id: Option<i64>,
    /// Calendar key in `MM-DD` form
    pub date: Option<String>,
    pub year: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<Category>,
    pub people: Vec<String>,
    pub reference_url: Option<String>,
    pub source: Option<EventSource>,
    pub like_count: Option<u64>,
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        let Value::Object(fields) = value else {
            return Event::default();
        };

        let text = |key: &str| fields.get(key).and_then(display_text);

        Event {
            id: fields.get("id").and_then(identifier),
            date: text("date"),
            year: text("year"),
            title: text("title"),
            description: text("description"),
            location: text("location"),
            category: text("category").map(Category::from),
            people: people(fields.get("people")),
            reference_url: text("reference_url"),
            source: text("source").map(EventSource::from),
            like_count: fields.get("like_count").and_then(count),
        }
    }
}

/// Response of the single-event endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub event: Option<Event>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Envelope {
    pub fn from_value(endpoint: &str, value: Value) -> Result<Self> {
        let mut fields = expect_object(endpoint, value)?;
        let success = expect_success(endpoint, &fields)?;

        Ok(Envelope {
            success,
            event: fields.remove("event").filter(is_truthy).map(Event::from),
            message: fields.get("message").and_then(display_text),
            error: fields.get("error").and_then(display_text),
        })
    }
}

/// Response of the featured/category/search endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct EventList {
    pub success: bool,
    pub events: Vec<Event>,
    /// Total the backend reports, which may exceed `events.len()`
    pub count: Option<u64>,
    /// Echo of the requested category
    pub category: Option<String>,
    /// Echo of the search text
    pub query: Option<String>,
    pub error: Option<String>,
}

impl EventList {
    pub fn from_value(endpoint: &str, value: Value) -> Result<Self> {
        let mut fields = expect_object(endpoint, value)?;
        let success = expect_success(endpoint, &fields)?;

        let events = match fields.remove("events") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(is_truthy)
                .map(Event::from)
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(AlmanacError::MalformedResponse {
                    endpoint: endpoint.to_string(),
                    reason: format!("`events` is not an array: {other}"),
                });
            }
        };

        Ok(EventList {
            success,
            events,
            count: fields.get("count").and_then(count),
            category: fields.get("category").and_then(display_text),
            query: fields.get("query").and_then(display_text),
            error: fields.get("error").and_then(display_text),
        })
    }
}

fn expect_object(endpoint: &str, value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(AlmanacError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: format!("expected a JSON object, got {}", kind(&other)),
        }),
    }
}

fn expect_success(endpoint: &str, fields: &Map<String, Value>) -> Result<bool> {
    match fields.get("success") {
        Some(Value::Bool(success)) => Ok(*success),
        _ => Err(AlmanacError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: match fields.get("error").and_then(display_text) {
                Some(error) => format!("no `success` flag ({error})"),
                None => "no `success` flag".to_string(),
            },
        }),
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match integral(n) {
            Some(whole) => whole.to_string(),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Whole-number value of `n`, also when it was sent as a float (`1991.0`)
fn integral(n: &serde_json::Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.into());
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < 1e18)
        .map(|f| f as i128)
}

fn people(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(display_text).collect(),
        _ => Vec::new(),
    }
}

fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => integral(n).and_then(|whole| u64::try_from(whole).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn identifier(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integral(n).and_then(|whole| i64::try_from(whole).ok()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
