use std::sync::Arc;

use axum::{
    Router,
    body::to_bytes,
    extract::{Request, State},
    response::Response,
    routing::any,
};

use crate::AppState;
use crate::services::{PROXIED_PREFIXES, ProxyError, is_proxied};

/// Largest request body relayed to the backend.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Routes for every backend prefix, both bare and with a tail.
pub fn routes() -> Router<Arc<AppState>> {
    PROXIED_PREFIXES
        .iter()
        .fold(Router::new(), |router, prefix| {
            router
                .route(prefix, any(forward))
                .route(&format!("{prefix}/{{*rest}}"), any(forward))
        })
}

/// Handler to relay a request to the backend
pub async fn forward(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    debug_assert!(is_proxied(parts.uri.path()));
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
    let body = to_bytes(body, MAX_BODY_BYTES).await?;

    state
        .upstream
        .forward(parts.method, &path_and_query, &parts.headers, body)
        .await
}
