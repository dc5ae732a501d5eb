//! The HTTP client wrapper shared by every resource module.
//!
//! All network access goes through [`HttpApiClient`]. It counts each request
//! in the [`LoadingTracker`], unwraps the backend's `{code, message, data}`
//! envelope, and reports transport failures through a [`Notifier`] so call
//! sites never need their own error display.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::loading::LoadingTracker;
use crate::log;

/// Message used when a business failure carries no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";
/// Message used when a transport failure yields nothing better to show.
pub const DEFAULT_NETWORK_FAILURE_MESSAGE: &str = "Network request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// The uniform response wrapper every backend endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// A fully built request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: ApiHeaders,
    pub body: Option<Value>,
}

/// What came back over the wire, before any envelope handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        detail: Option<String>,
        body: String,
    },
}

impl TransportError {
    /// Build a status error from a non-2xx response, keeping whatever detail
    /// the backend put in the body.
    pub fn from_response(response: ApiResponse) -> Self {
        TransportError::Status {
            status: response.status,
            detail: backend_detail(&response.body),
            body: response.body,
        }
    }

    /// Detail supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransportError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The text to show the user: backend detail, then our own message, then
    /// a generic fallback.
    pub fn display_message(&self) -> String {
        if let Some(detail) = self.detail().filter(|detail| !detail.is_empty()) {
            return detail.to_string();
        }
        let own = self.to_string();
        if own.is_empty() {
            DEFAULT_NETWORK_FAILURE_MESSAGE.to_string()
        } else {
            own
        }
    }
}

/// Pull the human readable detail out of an error body. Envelope-shaped
/// bodies carry it in `message`, framework errors in `detail`.
fn backend_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 2xx but the envelope reported a failure.
    #[error("{message}")]
    Business {
        code: Option<i64>,
        message: String,
        response: Box<ApiResponse>,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Parse error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// User-facing text for this error.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Business { message, .. } => message.clone(),
            ApiError::Transport(err) => err.display_message(),
            other => other.to_string(),
        }
    }

    /// The original response, when the error came from one.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Business { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiHeaders(HashMap<String, String>);

impl ApiHeaders {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn delete(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<ApiHeaders> for gloo_net::http::Headers {
    fn from(val: ApiHeaders) -> Self {
        let headers = gloo_net::http::Headers::new();
        for (key, value) in val.0 {
            headers.set(&key, &value);
        }
        headers
    }
}

/// Receives the message of every transport failure.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

/// Drops notifications on the floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_error(&self, _message: &str) {}
}

/// Adapts a closure into a [`Notifier`].
#[derive(Clone)]
pub struct FnNotifier(Rc<dyn Fn(&str)>);

impl FnNotifier {
    pub fn new(notify: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(notify))
    }
}

impl Notifier for FnNotifier {
    fn notify_error(&self, message: &str) {
        (self.0)(message);
    }
}

/// Moves a built request over the network.
///
/// Implementations return every HTTP response they receive, whatever its
/// status; only failures to get a response at all are errors.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Browser transport built on `gloo-net`, racing each request against a timer.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    timeout: Duration,
}

impl GlooTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        use futures::future::{self, Either};
        use gloo_net::http::RequestBuilder;

        let builder = match request.method {
            HttpMethod::Get => gloo_net::http::Request::get(&request.url),
            HttpMethod::Post => gloo_net::http::Request::post(&request.url),
            HttpMethod::Put => gloo_net::http::Request::put(&request.url),
            HttpMethod::Delete => gloo_net::http::Request::delete(&request.url),
        };
        let builder: RequestBuilder = builder
            .query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .headers(request.headers.into());

        let built = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|err| TransportError::Network(err.to_string()))?;

        let exchange = async move {
            let response = built
                .send()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            Ok(ApiResponse { status, body })
        };
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = gloo_timers::future::TimeoutFuture::new(millis);

        futures::pin_mut!(exchange);
        futures::pin_mut!(timer);
        match future::select(exchange, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}

/// The four verbs the resource modules are written against.
///
/// A query or body that serializes to `null` (for example `&()`) is left off
/// the request entirely.
#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    async fn get<T, Q>(&self, endpoint: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized;

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized;

    async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized;

    async fn delete<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: DeserializeOwned;
}

pub struct HttpApiClient<T = GlooTransport> {
    config: ClientConfig,
    headers: ApiHeaders,
    tracker: LoadingTracker,
    notifier: Rc<dyn Notifier>,
    transport: T,
}

impl HttpApiClient<GlooTransport> {
    /// A browser client. Transport failures are not shown anywhere until a
    /// notifier is attached with [`HttpApiClient::with_notifier`].
    pub fn new(config: ClientConfig, tracker: LoadingTracker) -> Self {
        let transport = GlooTransport::new(config.timeout);
        Self::with_transport(config, tracker, transport)
    }
}

impl<T: Transport> HttpApiClient<T> {
    pub fn with_transport(config: ClientConfig, tracker: LoadingTracker, transport: T) -> Self {
        Self {
            config,
            headers: ApiHeaders::new(),
            tracker,
            notifier: Rc::new(NoopNotifier),
            transport,
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Rc::new(notifier);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tracker(&self) -> &LoadingTracker {
        &self.tracker
    }

    pub fn set_header(&mut self, key: String, value: String) {
        self.headers.insert(key, value);
    }

    pub fn set_headers(&mut self, headers: Vec<(String, String)>) {
        for (key, value) in headers {
            self.headers.insert(key, value);
        }
    }

    fn build_request<Q, B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: &Q,
        body: &B,
    ) -> ApiResult<ApiRequest>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let query = query_pairs(query).map_err(ApiError::Serialize)?;
        let body = match serde_json::to_value(body).map_err(ApiError::Serialize)? {
            Value::Null => None,
            value => Some(value),
        };

        Ok(ApiRequest {
            method,
            url: self.config.url(endpoint),
            query,
            headers: self.headers.clone(),
            body,
        })
    }

    async fn request<R, Q, B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: &Q,
        body: &B,
    ) -> ApiResult<R>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let outcome = {
            let _in_flight = self.tracker.begin();
            let request = self.build_request(method, endpoint, query, body)?;
            log::debug!(method = method.as_str(), endpoint = endpoint, "sending request");
            self.transport.send(request).await
        };

        match outcome {
            Ok(response) if response.is_success() => unwrap_envelope(response),
            Ok(response) => Err(self.report(method, endpoint, TransportError::from_response(response))),
            Err(err) => Err(self.report(method, endpoint, err)),
        }
    }

    fn report(&self, method: HttpMethod, endpoint: &str, err: TransportError) -> ApiError {
        let message = err.display_message();
        log::warn!(
            method = method.as_str(),
            endpoint = endpoint,
            error = %err,
            "request failed: {message}"
        );
        self.notifier.notify_error(&message);
        ApiError::Transport(err)
    }
}

/// Turn a 2xx response into the caller's data, or a business error.
fn unwrap_envelope<R: DeserializeOwned>(response: ApiResponse) -> ApiResult<R> {
    match serde_json::from_str::<Envelope>(&response.body) {
        Ok(Envelope { code: 0, data, .. }) => {
            serde_json::from_value(data.unwrap_or(Value::Null)).map_err(ApiError::Decode)
        }
        Ok(Envelope { code, message, .. }) => Err(ApiError::Business {
            code: Some(code),
            message: message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            response: Box::new(response),
        }),
        Err(_) => Err(ApiError::Business {
            code: None,
            message: DEFAULT_FAILURE_MESSAGE.to_string(),
            response: Box::new(response),
        }),
    }
}

/// Flatten a query object into string pairs, skipping unset fields.
fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, serde_json::Error> {
    match serde_json::to_value(query)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect()),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "query parameters must be an object, got {other}"
        ))),
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport> ApiClient for HttpApiClient<T> {
    async fn get<R, Q>(&self, endpoint: &str, query: &Q) -> ApiResult<R>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(HttpMethod::Get, endpoint, query, &()).await
    }

    async fn post<R, B>(&self, endpoint: &str, body: &B) -> ApiResult<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, endpoint, &(), body).await
    }

    async fn put<R, B>(&self, endpoint: &str, body: &B) -> ApiResult<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, endpoint, &(), body).await
    }

    async fn delete<R>(&self, endpoint: &str) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        self.request(HttpMethod::Delete, endpoint, &(), &()).await
    }
}
