//! HTTP server mode for `natlas`.
//!
//! This module exposes the browser pages and a small JSON API over a
//! record snapshot loaded once at startup:
//!
//! - `GET /` – landing page with the search form.
//! - `GET /search?q=` – HTML results (none, detail card, or list).
//! - `GET /api/search?q=` – JSON array of matching records.
//! - `GET /v1/health` – simple health check endpoint.
//!
//! The server is intentionally thin: it extracts the query, delegates
//! to the search engine, and hands results to the renderer or the
//! JSON serializer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::models::{DisplayField, FieldNames, RecordSet};
use crate::render;
use crate::search;

/// Content security policy attached to every response.
pub const CONTENT_SECURITY_POLICY: &str =
    "script-src 'self' 'unsafe-inline' https://static.cloudflareinsights.com";

/// Shared, read-only state handed to every handler.
///
/// The record snapshot is published here before the listener starts
/// accepting connections and is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    pub records: Arc<RecordSet>,
    pub fields: Arc<FieldNames>,
    pub display: Arc<[DisplayField]>,
}

impl AppState {
    pub fn new(records: RecordSet, fields: FieldNames, display: Vec<DisplayField>) -> Self {
        Self {
            records: Arc::new(records),
            fields: Arc::new(fields),
            display: display.into(),
        }
    }
}

/// Query string accepted by the search routes. A missing `q` is the
/// empty query.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Simple health-check response payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the Axum router for the Natlas site and API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search_page))
        .route("/api/search", get(api_search))
        .route("/v1/health", get(health))
        .layer(middleware::map_response(with_security_headers))
        .with_state(state)
}

/// Run the HTTP server bound to the provided socket address.
///
/// This is used by the CLI `natlas serve` subcommand.
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, records = state.records.len(), "server is live");
    serve_with_listener(listener, state).await
}

/// Run the HTTP server using an existing `TcpListener`.
///
/// This is primarily used in tests to bind to an ephemeral port.
pub async fn serve_with_listener(listener: TcpListener, state: AppState) -> Result<()> {
    let app = router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn with_security_headers(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    response
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render::home_page(state.records.len()))
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let results = search::search(&params.q, &state.records, &state.fields);
    debug!(query = %params.q, results = results.len(), "html search");
    Html(render::results_page(
        &params.q,
        results,
        &state.fields,
        &state.display,
    ))
}

async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let results = search::search(&params.q, &state.records, &state.fields);
    debug!(query = %params.q, results = results.len(), "api search");
    Json(results).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    use crate::loader::load;
    use crate::models::default_display_fields;

    fn state() -> AppState {
        let records = load(
            "Country,Government: Country name: conventional long form,Capital\n\
             United States,United States of America,Washington\n\
             United Kingdom,United Kingdom of Great Britain and Northern Ireland,London\n\
             Chad,Republic of Chad,N'Djamena\n",
        )
        .expect("load");
        AppState::new(records, FieldNames::default(), default_display_fields())
    }

    fn params(q: &str) -> Query<SearchParams> {
        Query(SearchParams { q: q.to_string() })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok_status() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn home_page_reports_record_count() {
        let Html(html) = home(State(state())).await;
        assert!(html.contains("3 countries"));
    }

    #[tokio::test]
    async fn search_page_renders_list_for_partial_matches() {
        let Html(html) = search_page(State(state()), params("united")).await;
        assert!(html.contains("Found 2 matches"));
    }

    #[tokio::test]
    async fn search_page_renders_detail_for_exact_match() {
        let Html(html) = search_page(State(state()), params("Republic of Chad")).await;
        assert!(html.contains("<h2 class='country-name'>Chad</h2>"));
        assert!(html.contains("N&#39;Djamena"));
    }

    #[tokio::test]
    async fn api_search_returns_json_array_in_field_order() {
        let response = api_search(State(state()), params("chad")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );

        let body = body_text(response).await;
        assert_eq!(
            body,
            r#"[{"Country":"Chad","Government: Country name: conventional long form":"Republic of Chad","Capital":"N'Djamena"}]"#
        );
    }

    #[tokio::test]
    async fn api_search_with_no_matches_is_empty_array() {
        let response = api_search(State(state()), params("xyz")).await;
        assert_eq!(body_text(response).await, "[]");
    }

    #[tokio::test]
    async fn security_header_is_added() {
        let response = with_security_headers(health().await.into_response()).await;
        assert_eq!(
            response.headers().get(header::CONTENT_SECURITY_POLICY),
            Some(&HeaderValue::from_static(CONTENT_SECURITY_POLICY))
        );
    }

    #[tokio::test]
    async fn served_router_answers_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(serve_with_listener(listener, state()));

        let url = format!("http://{addr}/api/search?q=United%20States");
        let records: Vec<crate::models::Record> = reqwest::get(&url)
            .await
            .expect("request")
            .json()
            .await
            .expect("json body");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Capital"), Some("Washington"));
    }
}
