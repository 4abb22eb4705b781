//! HTTP wrapper: request construction, auth headers, response normalization.
//!
//! # Design
//! - This is the only layer that raises [`ApiError`]; everything above it
//!   either propagates deliberately (strict calls) or degrades to defaults.
//! - JSON is decoded only when the response declares a JSON content type.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, SessionIdentity};
use crate::error::{ApiError, ApiResult};

/// Header carrying the session user id.
pub const HEADER_USER_ID: &str = "x-user-id";

/// Normalized response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiBody {
    /// Parsed JSON document.
    Json(Value),
    /// Raw text for non-JSON responses.
    Text(String),
}

impl ApiBody {
    /// Decode a JSON body into `T`.
    ///
    /// # Errors
    /// Returns [`ApiError::UnexpectedBody`] for text bodies and
    /// [`ApiError::Decode`] when the JSON does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
            }
            Self::Text(text) => Err(ApiError::UnexpectedBody(text)),
        }
    }
}

/// Backend client bound to one configuration.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    /// Client with a default `reqwest` transport.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Client reusing a preconfigured transport (timeouts, default headers).
    #[must_use]
    pub const fn with_http_client(config: ClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session identity used for headers and user-scoped paths.
    #[must_use]
    pub const fn identity(&self) -> &SessionIdentity {
        &self.config.identity
    }

    fn headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.config.identity.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidRequest("token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(user_id) = self.config.identity.user_id() {
            let value = HeaderValue::from_str(user_id).map_err(|_| {
                ApiError::InvalidRequest("user id contains invalid characters".into())
            })?;
            headers.insert(HEADER_USER_ID, value);
        }
        Ok(headers)
    }

    /// Perform a request against `path` and normalize the response.
    ///
    /// # Errors
    /// Returns [`ApiError::Transport`] when no response arrives,
    /// [`ApiError::Status`] for non-2xx answers (carrying the body text), and
    /// [`ApiError::Decode`] when a JSON-declared body fails to parse. Bodies
    /// without a `Content-Type` are parsed as JSON when they are valid JSON.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<ApiBody> {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Transport { url, source })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        if is_json_content_type(&content_type) {
            serde_json::from_str(&text)
                .map(ApiBody::Json)
                .map_err(|err| ApiError::Decode(err.to_string()))
        } else if content_type.is_empty() {
            // Undeclared bodies are sniffed.
            Ok(serde_json::from_str(&text).map_or(ApiBody::Text(text), ApiBody::Json))
        } else {
            Ok(ApiBody::Text(text))
        }
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    /// Propagates [`ApiClient::send`] failures and decode mismatches.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None).await?.decode()
    }

    /// POST to `path` with an optional JSON body and decode the response.
    ///
    /// # Errors
    /// Propagates [`ApiClient::send`] failures and decode mismatches.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<T> {
        self.send(Method::POST, path, body).await?.decode()
    }
}

/// Whether a `Content-Type` header value denotes JSON.
#[must_use]
pub fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
