//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::frequency::FrequencyTable;
use crate::http::handlers::{health, most_frequent_word, record_word, track_metrics};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::shutdown::wait_for;

pub const WORD_PATH: &str = "/service/word";
pub const PREFIX_PATH: &str = "/service/prefix";
pub const HEALTH_PATH: &str = "/health";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<FrequencyTable>,
}

/// HTTP server for the word frequency service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving the given table.
    pub fn new(config: ServiceConfig, table: Arc<FrequencyTable>) -> Self {
        let state = AppState { table };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(WORD_PATH, post(record_word))
            .route(PREFIX_PATH, get(most_frequent_word))
            .route(HEALTH_PATH, get(health))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// A clone of the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            max_body_size = self.config.security.max_body_size,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    fn test_router(table: Arc<FrequencyTable>) -> Router {
        HttpServer::new(ServiceConfig::default(), table).router()
    }

    async fn post_word(router: &Router, body: &str) -> StatusCode {
        post_word_text(router, body).await.0
    }

    async fn post_word_text(router: &Router, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(WORD_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_prefix(router: &Router, query: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(format!("{PREFIX_PATH}{query}"))
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_record_then_query() {
        let table = Arc::new(FrequencyTable::new());
        let router = test_router(table.clone());

        assert_eq!(post_word(&router, r#"{"word": "Apple"}"#).await, StatusCode::OK);
        assert_eq!(post_word(&router, r#"{"word": " apple "}"#).await, StatusCode::OK);
        assert_eq!(post_word(&router, r#"{"word": "apricot"}"#).await, StatusCode::OK);
        assert_eq!(table.count("apple"), 2);

        let (status, body) = get_prefix(&router, "?prefix=AP").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"word":"apple"}"#);
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let table = Arc::new(FrequencyTable::new());
        let router = test_router(table.clone());

        assert_eq!(post_word(&router, "not json").await, StatusCode::BAD_REQUEST);
        assert_eq!(post_word(&router, r#"{"word": 5}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(post_word(&router, r#"{"word": "hi5"}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(post_word(&router, r#"{"word": "  "}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(post_word(&router, "{}").await, StatusCode::BAD_REQUEST);
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_not_found() {
        let router = test_router(Arc::new(FrequencyTable::new()));

        let (status, body) = get_prefix(&router, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        post_word(&router, r#"{"word": "cat"}"#).await;
        let (status, _) = get_prefix(&router, "?prefix=z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_prefix(&router, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"word":"cat"}"#);
    }

    #[tokio::test]
    async fn test_request_id_header() {
        let router = test_router(Arc::new(FrequencyTable::new()));

        let request = Request::builder().uri(HEALTH_PATH).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let request = Request::builder()
            .uri(HEALTH_PATH)
            .header("x-request-id", "client-id-1")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "client-id-1");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut config = ServiceConfig::default();
        config.security.max_body_size = 16;
        let router = HttpServer::new(config, Arc::new(FrequencyTable::new())).router();

        let status = post_word(&router, r#"{"word": "aaaaaaaaaaaaaaaaaaaaaaaa"}"#).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let router = test_router(Arc::new(FrequencyTable::new()));
        let request = Request::builder().uri(WORD_PATH).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_lenient_body_decoding() {
        let table = Arc::new(FrequencyTable::new());
        let router = test_router(table.clone());

        assert_eq!(post_word(&router, r#"{"Word":"cat"}"#).await, StatusCode::OK);
        assert_eq!(post_word(&router, r#"{"word":"cat"} {"x":1}"#).await, StatusCode::OK);
        assert_eq!(table.count("cat"), 2);

        let (status, body) = post_word_text(&router, r#"{"word":null}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid word format.");

        let (status, body) = post_word_text(&router, "[1]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request body.");
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_prefix_uses_first() {
        let table = Arc::new(FrequencyTable::new());
        table.record("apple").unwrap();
        table.record("banana").unwrap();
        let router = test_router(table);

        let (status, body) = get_prefix(&router, "?prefix=a&prefix=b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"word":"apple"}"#);

        let (status, body) = get_prefix(&router, "?other=1&prefix=b&prefix=a").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"word":"banana"}"#);
    }

    #[tokio::test]
    async fn test_slow_body_times_out() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = 1;
        let table = Arc::new(FrequencyTable::new());
        let router = HttpServer::new(config, table.clone()).router();

        let stalled = futures_util::stream::pending::<Result<axum::body::Bytes, std::io::Error>>();
        let request = Request::builder()
            .method(Method::POST)
            .uri(WORD_PATH)
            .body(Body::from_stream(stalled))
            .unwrap();

        let response = tokio::time::timeout(Duration::from_secs(5), router.oneshot(request))
            .await
            .expect("timeout layer should answer first")
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(table.is_empty());
    }
}
