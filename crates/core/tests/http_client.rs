use std::{collections::HashMap, sync::Arc};

use almanac_core::{
    AlmanacError, EventQuery, HistoryApi, HistoryWidget, HttpHistoryApi, ListQuery, LoadOutcome,
    Panel, WidgetConfig,
};
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header::COOKIE},
    response::{Html, IntoResponse},
    routing::get,
};
use serde_json::json;

async fn today(headers: HeaderMap) -> impl IntoResponse {
    let cookie = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    Json(json!({
        "success": true,
        "message": "Success",
        "event": {
            "date": "07-26",
            "year": 1778,
            "title": "Prvi vzpon na Triglav",
            "description": cookie,
            "category": "first_ascent"
        }
    }))
}

async fn by_date(Path(date): Path<String>) -> impl IntoResponse {
    if date == "13-45" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Invalid date format (use MM-DD)"})),
        );
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "error": format!("No event found for date {date}")})),
    )
}

async fn random() -> impl IntoResponse {
    (
        StatusCode::OK,
        Html("<html><body>Prijava</body></html>"),
    )
}

async fn search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let query = params.get("q").cloned().unwrap_or_default();
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(10);
    let events: Vec<_> = (1..=3)
        .map(|i| json!({"title": format!("{query} {i}"), "year": 1900 + i}))
        .take(limit)
        .collect();
    Json(json!({"success": true, "events": events, "query": query}))
}

async fn serve() -> String {
    let router = Router::new()
        .route("/api/today-in-history", get(today))
        .route("/api/history/random", get(random))
        .route("/api/history/search", get(search))
        .route("/api/history/:date", get(by_date));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

async fn widget(session: Option<&str>) -> (Arc<HistoryWidget<HttpHistoryApi>>, WidgetConfig) {
    let config = WidgetConfig::new(&serve().await)
        .unwrap()
        .with_session_cookie(session.map(str::to_string));
    let api = HttpHistoryApi::new(&config).unwrap();
    let widget = Arc::new(HistoryWidget::new(api, config.base_url.clone()));
    (widget, config)
}

#[tokio::test]
async fn today_renders_content_and_forwards_session() {
    let (widget, _) = widget(Some("s3cret")).await;

    let outcome = widget.load(EventQuery::Today).await;

    assert_eq!(
        outcome,
        LoadOutcome::Rendered {
            title: "Prvi vzpon na Triglav".to_string()
        }
    );
    let panel = widget.panel();
    let rendered = panel.content().unwrap();
    assert_eq!(rendered.year, "1778");
    assert_eq!(rendered.description, "session=s3cret");
    assert_eq!(rendered.category.label, "Prvi vzpon");
}

#[tokio::test]
async fn not_found_body_is_empty_panel() {
    let (widget, _) = widget(None).await;

    let outcome = widget.load(EventQuery::Date("02-30".to_string())).await;

    assert_eq!(outcome, LoadOutcome::Empty);
    assert_eq!(widget.panel(), Panel::Empty);
}

#[tokio::test]
async fn rejected_date_is_empty_panel() {
    let (widget, _) = widget(None).await;
    assert_eq!(
        widget.load(EventQuery::Date("13-45".to_string())).await,
        LoadOutcome::Empty
    );
}

#[tokio::test]
async fn html_body_is_error_panel() {
    let (widget, _) = widget(None).await;

    let outcome = widget.load(EventQuery::Random).await;

    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(widget.panel(), Panel::Error);
    assert!(!widget.is_loading());
}

#[tokio::test]
async fn unreachable_backend_is_error_panel() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = WidgetConfig::new(&format!("http://{addr}")).unwrap();
    let api = HttpHistoryApi::new(&config).unwrap();
    let err = api.fetch_event(&EventQuery::Today).await.unwrap_err();
    assert!(matches!(err, AlmanacError::ApiError(_)));

    let widget = HistoryWidget::new(api, config.base_url.clone());
    assert!(matches!(
        widget.load(EventQuery::Today).await,
        LoadOutcome::Failed { .. }
    ));
    assert_eq!(widget.panel(), Panel::Error);
}

#[tokio::test]
async fn search_list_passes_parameters() {
    let (widget, _) = widget(None).await;

    let list = widget
        .api()
        .fetch_events(&ListQuery::Search {
            query: "Triglav".to_string(),
            limit: 2,
        })
        .await
        .unwrap();

    assert!(list.success);
    let titles: Vec<_> = list
        .events
        .iter()
        .filter_map(|e| e.title.as_deref())
        .collect();
    assert_eq!(titles, ["Triglav 1", "Triglav 2"]);
}

#[tokio::test]
async fn share_points_at_the_widget_page() {
    let (widget, config) = widget(None).await;
    widget.load(EventQuery::Today).await;

    let payload = widget.share().unwrap();
    assert_eq!(payload.url, config.base_url);
    assert!(payload.text.starts_with("1778 - Prvi vzpon na Triglav"));
}
