//! Request handlers: JSON endpoints plus the SSE streaming run.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::{Stream, StreamExt};
use namehunt_lib::{
    fallback_grouping, normalize_all, AvailabilityResult, CancelToken, CategoryGroup, RunEvent,
    RunOutcome,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub keywords: String,
    #[serde(default = "default_tlds")]
    pub tlds: String,
}

fn default_tlds() -> String {
    "com".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub domains: Vec<String>,
}

/// `POST /api/check`: probe every listed domain and return all statuses.
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<Vec<AvailabilityResult>>, ApiError> {
    let domains = normalize_all(request.domains);
    if domains.is_empty() {
        return Err(ApiError::bad_request("no domains to check"));
    }

    tracing::info!(count = domains.len(), "checking domains");
    Ok(Json(state.runner.check_all(&domains).await))
}

/// `POST /api/generate`: propose candidate names from keywords.
///
/// Upstream generation failures surface as an empty list, mirroring the
/// library contract: "nothing to check" is a graceful end state.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.keywords.trim().is_empty() {
        return Err(ApiError::bad_request("keywords must not be empty"));
    }

    let domains = state.generator.generate(&request.keywords, &request.tlds).await;
    Ok(Json(GenerateResponse { domains }))
}

/// `POST /api/categorize`: group available domains into labeled buckets.
pub async fn categorize(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<Vec<CategoryGroup>>, ApiError> {
    let domains = normalize_all(request.domains);
    if domains.is_empty() {
        return Err(ApiError::bad_request("no domains to categorize"));
    }

    Ok(Json(state.categorizer.categorize(&domains).await))
}

/// `POST /api/run`: stream a whole availability run as server-sent events.
///
/// Frames: `progress` after each batch, then one of `results` / `no_results`
/// on completion, then `finished`; a fatal run failure emits `error` instead.
/// A client disconnect drops the stream, which stops further batches.
pub async fn run(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let domains = normalize_all(request.domains);
    if domains.is_empty() {
        return Err(ApiError::bad_request("no domains to check"));
    }

    tracing::info!(count = domains.len(), "starting streamed run");

    let categorizer = state.categorizer.clone();
    let categorize = state.config.categorize;

    let events = state
        .runner
        .run_stream(domains, CancelToken::new())
        .then(move |event| {
            let categorizer = categorizer.clone();
            async move {
                match event {
                    RunEvent::Progress(progress) => {
                        vec![sse_event("progress", &progress)]
                    }
                    RunEvent::Done(RunOutcome::Completed(available)) if available.is_empty() => {
                        vec![
                            sse_event("no_results", &json!({})),
                            sse_event("finished", &json!({})),
                        ]
                    }
                    RunEvent::Done(RunOutcome::Completed(available)) => {
                        let groups = if categorize {
                            categorizer.categorize(&available).await
                        } else {
                            fallback_grouping(&available)
                        };
                        vec![
                            sse_event(
                                "results",
                                &json!({ "available": available, "groups": groups }),
                            ),
                            sse_event("finished", &json!({})),
                        ]
                    }
                    RunEvent::Done(RunOutcome::Cancelled(partial)) => {
                        vec![
                            sse_event("finished", &json!({ "available": partial })),
                        ]
                    }
                    RunEvent::Done(RunOutcome::Failed(e)) => {
                        tracing::error!(error = %e, "streamed run failed");
                        vec![sse_event("error", &json!({ "error": e.to_string() }))]
                    }
                }
            }
        })
        .map(futures::stream::iter)
        .flatten()
        .map(Ok);

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Build a named SSE frame with a JSON payload.
fn sse_event<T: Serialize>(name: &'static str, data: &T) -> Event {
    match Event::default().event(name).json_data(data) {
        Ok(event) => event,
        // Only reachable if the payload fails to serialize.
        Err(e) => Event::default()
            .event("error")
            .data(format!("{{\"error\":\"{}\"}}", e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::app_router;
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use namehunt_lib::{
        AvailabilityResult, AvailabilityStatus, BatchRunner, ProbeBackend, RunConfig,
    };
    use std::collections::HashSet;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Scripted backend: a fixed set of available names, no network.
    struct FixtureBackend {
        available: HashSet<String>,
    }

    #[async_trait]
    impl ProbeBackend for FixtureBackend {
        async fn probe(&self, domain: &str) -> AvailabilityResult {
            let status = if self.available.contains(domain) {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Unavailable
            };
            AvailabilityResult::new(domain, status)
        }
    }

    /// Config whose text-service endpoint is unreachable, so the categorizer
    /// always takes its deterministic fallback without leaving the host.
    fn offline_config() -> RunConfig {
        let mut config = RunConfig::default().with_batch_size(2);
        config.llm.endpoint = "http://127.0.0.1:1/v1/chat/completions".to_string();
        config
    }

    fn test_app(available: &[&str]) -> axum::Router {
        let backend = Arc::new(FixtureBackend {
            available: available.iter().map(|d| d.to_string()).collect(),
        });
        let config = offline_config();
        let runner = BatchRunner::with_backend(backend, config.clone());
        app_router(AppState::with_runner(runner, config).unwrap())
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(body: Body) -> String {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn check_returns_all_statuses() {
        let app = test_app(&["free.com"]);
        let response = app
            .oneshot(json_post(
                "/api/check",
                r#"{"domains":["free.com","Taken.com","https://www.free.com/"]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<AvailabilityResult> =
            serde_json::from_str(&body_string(response.into_body()).await).unwrap();

        // Input normalizes and dedupes to two domains.
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].domain, "free.com");
        assert_eq!(body[0].status, AvailabilityStatus::Available);
        assert_eq!(body[1].domain, "taken.com");
        assert_eq!(body[1].status, AvailabilityStatus::Unavailable);
    }

    #[tokio::test]
    async fn check_rejects_empty_list() {
        let app = test_app(&[]);
        let response = app
            .oneshot(json_post("/api/check", r#"{"domains":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response.into_body()).await;
        assert!(body.contains("\"error\""));
    }

    #[tokio::test]
    async fn wrong_verb_is_405() {
        let app = test_app(&[]);
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn generate_rejects_blank_keywords() {
        let app = test_app(&[]);
        let response = app
            .oneshot(json_post("/api/generate", r#"{"keywords":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn categorize_falls_back_without_upstream() {
        let app = test_app(&[]);
        let response = app
            .oneshot(json_post(
                "/api/categorize",
                r#"{"domains":["a.com","b.com"]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let groups: Vec<namehunt_lib::CategoryGroup> =
            serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, namehunt_lib::FALLBACK_CATEGORY);
        assert_eq!(groups[0].domains, vec!["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn run_streams_progress_then_results() {
        let app = test_app(&["a.com", "c.com"]);
        let response = app
            .oneshot(json_post(
                "/api/run",
                r#"{"domains":["a.com","b.com","c.com"]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/event-stream"));

        let body = body_string(response.into_body()).await;
        // Two batches of two, then terminal frames.
        assert_eq!(body.matches("event: progress").count(), 2);
        assert!(body.contains("event: results"));
        assert!(body.contains("\"available\":[\"a.com\",\"c.com\"]"));
        assert!(body.contains("event: finished"));
        let results_at = body.find("event: results").unwrap();
        let finished_at = body.find("event: finished").unwrap();
        assert!(results_at < finished_at);
    }

    #[tokio::test]
    async fn run_with_no_hits_emits_no_results() {
        let app = test_app(&[]);
        let response = app
            .oneshot(json_post("/api/run", r#"{"domains":["a.com","b.com"]}"#))
            .await
            .unwrap();

        let body = body_string(response.into_body()).await;
        assert!(body.contains("event: no_results"));
        assert!(body.contains("event: finished"));
        assert!(!body.contains("event: results\n"));
    }
}
