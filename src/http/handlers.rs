//! Route handlers for the word API.
//!
//! Each handler validates wire input, makes one call into the
//! [`FrequencyTable`](crate::frequency::FrequencyTable), and serializes the
//! result. No lock is held across an `.await`.

use std::fmt;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{MatchedPath, Query, State},
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::http::request::request_id;
use crate::http::response::{ApiError, HealthStatus, WordResponse};
use crate::http::server::AppState;
use crate::observability::metrics;

/// `POST /service/word` body.
///
/// The `word` key matches case-insensitively and the last match wins.
/// A missing key, a `null` value or a `null` body all read as empty.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecordWordRequest {
    pub word: String,
}

impl<'de> Deserialize<'de> for RecordWordRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordWordVisitor)
    }
}

struct RecordWordVisitor;

impl<'de> Visitor<'de> for RecordWordVisitor {
    type Value = RecordWordRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RecordWordRequest::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut request = RecordWordRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("word") {
                // null leaves an earlier value in place
                if let Some(word) = map.next_value::<Option<String>>()? {
                    request.word = word;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

/// Decode the first JSON value in `body`, ignoring anything after it.
pub fn decode_first<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(result) => result,
        None => Err(de::Error::custom("empty request body")),
    }
}

/// First `prefix` value in a query string, empty if absent.
pub fn first_prefix(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == "prefix")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Count one occurrence of the submitted word.
pub async fn record_word(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request_id = request_id(&headers);

    let request: RecordWordRequest = decode_first(&body).map_err(|e| {
        tracing::debug!(request_id = %request_id, error = %e, "Rejected request body");
        ApiError::InvalidBody(e)
    })?;

    if let Err(e) = state.table.record(&request.word) {
        tracing::debug!(request_id = %request_id, error = %e, "Rejected word");
        metrics::record_word_rejected();
        return Err(e.into());
    }

    metrics::record_word_recorded();
    metrics::record_distinct_words(state.table.len());
    tracing::debug!(request_id = %request_id, "Word recorded");
    Ok(StatusCode::OK)
}

/// Return the most frequent word with the given prefix.
pub async fn most_frequent_word(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<WordResponse>, ApiError> {
    let prefix = first_prefix(pairs);
    let found = state.table.most_frequent_with_prefix(&prefix);
    metrics::record_prefix_query(found.is_some());

    tracing::debug!(
        request_id = %request_id(&headers),
        prefix = %prefix,
        found = found.is_some(),
        "Prefix query"
    );

    found
        .map(|word| Json(WordResponse { word }))
        .ok_or(ApiError::NotFound)
}

/// Liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        distinct_words: state.table.len(),
    })
}

/// Middleware recording request count and latency per route.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;
    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
