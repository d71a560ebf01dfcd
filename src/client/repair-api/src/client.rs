//! Shared HTTP client.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, DEFAULT_ERROR_MESSAGE};

/// Error body returned by the backend.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Pulls a human-readable message out of an error body.
///
/// `error` wins over `message`; blank fields and non-JSON bodies yield `None`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_slice(body).ok()?;
    [parsed.error, parsed.message]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
}

/// Cookie-carrying client for the repair-shop backend.
///
/// Clones share the connection pool and the cookie jar, so a session opened
/// through one clone is visible to all of them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client with its own cookie jar.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base API URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Starts a request with the JSON content type. The cookie jar attaches
    /// the session on send.
    pub fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Shared request function.
    ///
    /// Sends `body` as JSON when given. A 2xx body is decoded into `T`;
    /// anything else becomes [`ApiError::Server`] with the backend's message.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "api request");

        let mut req = self.builder(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let resp = Self::error_for_status(resp).await?;

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET `path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// POST `body` to `path`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Passes 2xx responses through and turns the rest into
    /// [`ApiError::Server`].
    pub async fn error_for_status(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.bytes().await.unwrap_or_default();
        let message =
            extract_error_message(&body).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        debug!(status = status.as_u16(), %message, "api error response");

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
