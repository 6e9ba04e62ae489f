//! HTTP transport seam between `ApiClient` and the network.
//!
//! `HttpTransport` is the reqwest-backed implementation. Tests swap in
//! `testing::ScriptedTransport` to script responses and inspect requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use tracing::debug;

use super::ApiError;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A single outbound request. Bodies are already serialized to JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response: status plus body text. Status checking is left to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request/response exchange.
    /// Only network-level failures are errors; any status is a response.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed transport.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Every request is sent as JSON; no authorization header is attached.
    fn json_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    fn build_request(&self, request: &ApiRequest) -> Result<reqwest::Request, ApiError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(Self::json_headers());
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let built = self.build_request(&request)?;
        debug!(method = %request.method, url = %request.url, "Sending request");

        let response = self.client.execute(built).await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted in-memory transport for unit tests.

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    enum Scripted {
        Respond(ApiResponse),
        Fail(String),
    }

    /// Replies from per-(method, url) queues and records every request.
    /// Unscripted requests get a 404. The last reply of a queue is repeated.
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
        requests: Mutex<Vec<ApiRequest>>,
        delays: Mutex<HashMap<(Method, String), Duration>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, method: Method, url: &str, reply: Scripted) {
            self.replies
                .lock()
                .unwrap()
                .entry((method, url.to_string()))
                .or_default()
                .push_back(reply);
        }

        pub fn respond(&self, method: Method, url: &str, status: u16, body: &str) -> &Self {
            let status = StatusCode::from_u16(status).unwrap();
            self.push(method, url, Scripted::Respond(ApiResponse::new(status, body)));
            self
        }

        pub fn respond_json(
            &self,
            method: Method,
            url: &str,
            body: serde_json::Value,
        ) -> &Self {
            self.respond(method, url, 200, &body.to_string())
        }

        pub fn fail(&self, method: Method, url: &str, reason: &str) -> &Self {
            self.push(method, url, Scripted::Fail(reason.to_string()));
            self
        }

        /// Hold replies for `url` back by `delay`.
        pub fn delay(&self, method: Method, url: &str, delay: Duration) -> &Self {
            self.delays
                .lock()
                .unwrap()
                .insert((method, url.to_string()), delay);
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, method: Method, url: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .count()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            let key = (request.method.clone(), request.url.clone());
            self.requests.lock().unwrap().push(request);

            let delay = self.delays.lock().unwrap().get(&key).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let mut replies = self.replies.lock().unwrap();
            let queue = match replies.get_mut(&key) {
                Some(queue) if !queue.is_empty() => queue,
                _ => return Ok(ApiResponse::new(StatusCode::NOT_FOUND, "")),
            };
            let reply = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().map(|r| match r {
                    Scripted::Respond(resp) => Scripted::Respond(resp.clone()),
                    Scripted::Fail(reason) => Scripted::Fail(reason.clone()),
                })
            };
            match reply {
                Some(Scripted::Respond(resp)) => Ok(resp),
                Some(Scripted::Fail(reason)) => Err(ApiError::ConnectionFailed(reason)),
                None => Ok(ApiResponse::new(StatusCode::NOT_FOUND, "")),
            }
        }
    }
}
