//! Forwarding to the real backend.

use axum::{
    Json,
    body::{Body, Bytes},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use beacon::log;
use serde_json::json;
use thiserror::Error;

/// Path prefixes owned by the backend. Everything else is the frontend's.
pub const PROXIED_PREFIXES: [&str; 3] = ["/api", "/health", "/ready"];

/// Headers that describe one connection and must not be forwarded.
const HOP_BY_HOP: [header::HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

/// Whether `path` belongs to the backend: a prefix itself or anything below it.
pub fn is_proxied(path: &str) -> bool {
    PROXIED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("request body could not be read: {0}")]
    Body(#[from] axum::Error),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Answers in the backend's own envelope so the client reads the message.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "code": status.as_u16(),
            "message": self.to_string(),
            "data": null,
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    target: String,
}

impl Upstream {
    /// `target` is scheme and authority, without a trailing slash.
    pub fn new(target: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            target: target.into(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.target, path_and_query)
    }

    /// Replay one request against the backend and relay its answer unchanged.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response, ProxyError> {
        let url = self.url(path_and_query);
        log::debug!("{method} {path_and_query} -> {url}");

        let mut outbound = strip_hop_by_hop(headers);
        outbound.remove(header::HOST);

        let mut request = self.client.request(method, url.as_str()).headers(outbound);
        if !body.is_empty() {
            request = request.body(body);
        }

        let upstream = request.send().await.inspect_err(|err| {
            log::warn!("upstream request to {url} failed: {err}");
        })?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers());
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn proxies_prefixes_and_their_subpaths() {
        assert!(is_proxied("/api"));
        assert!(is_proxied("/api/sources/42"));
        assert!(is_proxied("/health"));
        assert!(is_proxied("/ready"));
        assert!(is_proxied("/ready/db"));
    }

    #[test]
    fn leaves_frontend_paths_alone() {
        assert!(!is_proxied("/"));
        assert!(!is_proxied("/dashboard"));
        assert!(!is_proxied("/apis"));
        assert!(!is_proxied("/healthz"));
        assert!(!is_proxied("/static/api"));
    }

    #[test]
    fn url_appends_path_and_query() {
        let upstream = Upstream::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            upstream.url("/api/contents?page=2&keyword=rust"),
            "http://127.0.0.1:8000/api/contents?page=2&keyword=rust"
        );
    }

    #[test]
    fn drops_connection_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));

        let kept = strip_hop_by_hop(&headers);
        assert_eq!(kept.len(), 2);
        assert!(kept.contains_key(header::CONTENT_TYPE));
        assert!(kept.contains_key("x-request-id"));
    }

    #[test]
    fn unreadable_body_is_bad_request() {
        let err = ProxyError::Body(axum::Error::new("stream reset"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
