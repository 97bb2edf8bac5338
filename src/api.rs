//! HTTP plumbing for the doork JSON API with consistent timeouts and error
//! handling. All network access goes through the [`Transport`] trait so the
//! ceremony and profile clients can be exercised with a scripted transport
//! in tests. The helpers do not store secrets or tokens; they only attach
//! headers provided by callers.

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::AuthError;

/// Default request timeout (milliseconds) applied by the browser transport.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request handed to a [`Transport`]. Built with the fluent helpers below;
/// fields stay public so tests can assert on what was sent.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub include_credentials: bool,
}

impl ApiRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            include_credentials: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches a bearer token in the `Authorization` header.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, AuthError> {
        let payload = serde_json::to_string(body)
            .map_err(|err| AuthError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = Some(payload);
        Ok(self.header("Content-Type", "application/json"))
    }

    /// Sends browser credentials (cookies) with the request.
    #[must_use]
    pub fn include_credentials(mut self) -> Self {
        self.include_credentials = true;
        self
    }

    /// Case-insensitive request header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response returned by a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive response header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AuthError> {
        serde_json::from_str(&self.body)
            .map_err(|err| AuthError::Parse(format!("Failed to decode response: {err}")))
    }
}

/// Capability to execute HTTP requests. The browser implementation is
/// [`GlooTransport`]; tests inject fakes that replay scripted responses.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        (**self).send(request).await
    }
}

/// Builds a URL from a base URL and the provided path.
pub fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Browser transport backed by `gloo-net` with an abort timeout so requests
/// never hang UI state.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(target_arch = "wasm32")]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        use gloo_timers::callback::Timeout;
        use web_sys::AbortController;

        let controller = AbortController::new()
            .map_err(|_| AuthError::Config("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

        let mut builder = match request.method {
            Method::Get => gloo_net::http::Request::get(&request.url),
            Method::Post => gloo_net::http::Request::post(&request.url),
        }
        .abort_signal(Some(&signal));

        if request.include_credentials {
            builder = builder.credentials(web_sys::RequestCredentials::Include);
        }

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let built = match request.body {
            Some(payload) => builder.body(payload),
            None => builder.build(),
        }
        .map_err(|err| AuthError::Serialization(format!("Failed to build request: {err}")))?;

        let response = built.send().await.map_err(map_request_error)?;

        let status = response.status();
        let headers = response.headers().entries().collect();
        let body = response.text().await.unwrap_or_default();

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Maps network errors into `AuthError` variants with timeout detection.
#[cfg(target_arch = "wasm32")]
fn map_request_error(err: gloo_net::Error) -> AuthError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AuthError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AuthError::Network(format!("Unable to reach the server: {message}"))
    }
}
