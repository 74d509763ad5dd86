use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::TransportError;

/// Shared HTTP client for one backend: base url, timeout and bearer token.
///
/// Clones share the token, so setting it once (after login) applies to every
/// collection built from this client.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl RestClient {
    /// Client with reqwest defaults and no timeout.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client using the configured base url and request timeout.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TransportError::Unreachable(format!("cannot build http client: {}", e)))?;
        Self::with_client(http, &config.base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            TransportError::Unreachable(format!("invalid base url {}: {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(TransportError::Unreachable(format!(
                "invalid base url {}: cannot be a base",
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url: parsed,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_bearer_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_bearer_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    /// `{base}/{path}[/{id}]`. The id is pushed as a single, escaped segment.
    pub(crate) fn endpoint(&self, path: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.request_with_token(method, url, self.bearer_token().as_deref())
    }

    /// Request carrying `token` instead of the shared one.
    pub(crate) fn request_with_token(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
    ) -> RequestBuilder {
        debug!(%method, %url, "request");
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = send(request).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), TransportError> {
        send(request).await?;
        Ok(())
    }
}

/// Error body returned by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

async fn send(request: RequestBuilder) -> Result<Response, TransportError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message.or(body.error));
    debug!(status = status.as_u16(), ?message, "request rejected");

    Err(TransportError::Status {
        code: status.as_u16(),
        message,
    })
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_decode() {
        TransportError::Decode(err.to_string())
    } else {
        TransportError::Unreachable(err.to_string())
    }
}
