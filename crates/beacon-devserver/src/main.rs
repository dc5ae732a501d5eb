mod config;
mod handlers;
mod services;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use beacon::errors::Report;
use beacon::log;

use config::DevServerConfig;
use services::Upstream;

/// Shared by every handler.
pub struct AppState {
    pub upstream: Upstream,
}

/// Backend prefixes go to the proxy; everything else is the built frontend,
/// with `index.html` standing in for client-side routes.
fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(handlers::proxy::routes())
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    // Setup logging
    beacon::log::setup()?;

    let config = DevServerConfig::from_env()?;
    let state = Arc::new(AppState {
        upstream: Upstream::new(config.proxy_target.clone())?,
    });

    let listener = TcpListener::bind(config.addr).await?;
    log::info!("Serving {} on http://{}", config.static_dir.display(), config.addr);
    log::info!("Proxying /api, /health and /ready to {}", state.upstream.target());
    log::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app(state, &config.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutting down server");

    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json,
        body::{Body, to_bytes},
        http::{HeaderMap, Method, Request, StatusCode, Uri},
        routing::any,
    };
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use tower::ServiceExt;

    async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
        Json(json!({
            "code": 0,
            "message": "",
            "data": {
                "method": method.as_str(),
                "uri": uri.to_string(),
                "host": headers.get("host").and_then(|v| v.to_str().ok()),
                "body": body,
            },
        }))
    }

    /// A stand-in backend on an ephemeral port; returns its base URL.
    async fn spawn_backend() -> String {
        let router = Router::new()
            .route("/api/{*rest}", any(echo))
            .route("/health", any(echo))
            .route("/ready", any(|| async { (StatusCode::SERVICE_UNAVAILABLE, "not ready") }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn server(target: &str, static_dir: &Path) -> Router {
        let state = Arc::new(AppState {
            upstream: Upstream::new(target).unwrap(),
        });
        app(state, static_dir)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn static_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("beacon-devserver-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>beacon</html>").unwrap();
        dir
    }

    #[tokio::test]
    async fn forwards_method_path_query_and_body() {
        let target = spawn_backend().await;
        let response = server(&target, Path::new("missing-dist"))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sources?page=2&page_size=10")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":"rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let data = &json_body(response).await["data"];
        assert_eq!(data["method"], "POST");
        assert_eq!(data["uri"], "/api/sources?page=2&page_size=10");
        assert_eq!(data["body"], r#"{"value":"rust"}"#);
        assert_eq!(data["host"], target.trim_start_matches("http://"));
    }

    #[tokio::test]
    async fn forwards_bare_prefix() {
        let target = spawn_backend().await;
        let response = server(&target, Path::new("missing-dist"))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["method"], "GET");
    }

    #[tokio::test]
    async fn relays_backend_status() {
        let target = spawn_backend().await;
        let response = server(&target, Path::new("missing-dist"))
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"not ready");
    }

    #[tokio::test]
    async fn unreachable_backend_answers_bad_gateway_envelope() {
        let response = server("http://127.0.0.1:1", Path::new("missing-dist"))
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/sources/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["code"], 502);
        assert!(body["data"].is_null());
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("backend unreachable"))
        );
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        let dir = static_dir("routes");
        // Unreachable target: these paths must never reach the proxy.
        let app = server("http://127.0.0.1:1", &dir);

        for path in ["/dashboard", "/settings", "/apis"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], b"<html>beacon</html>");
        }
    }

    #[tokio::test]
    async fn missing_build_is_not_found() {
        let response = server("http://127.0.0.1:1", Path::new("missing-dist"))
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
