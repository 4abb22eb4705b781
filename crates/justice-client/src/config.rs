//! Explicit client configuration.
//!
//! # Design
//! - The base URL and session identity are constructed once at bootstrap and
//!   handed to [`crate::ApiClient`]; nothing reads ambient globals.
//! - URL joining lives here so every request and asset link agrees on it.

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
/// User identifier used until the host page supplies a real one.
pub const DEFAULT_USER_ID: &str = "1";

/// Identity attached to every authenticated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Current user identifier; empty means anonymous.
    pub user_id: String,
    /// Optional bearer token.
    pub token: Option<String>,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            token: None,
        }
    }
}

impl SessionIdentity {
    /// User id when one is set.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        let trimmed = self.user_id.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Bearer token when one is set.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Connection settings for the backend API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    /// Session identity used for headers and user-scoped paths.
    pub identity: SessionIdentity,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl ClientConfig {
    /// Configuration for `base_url` with the default identity.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            identity: SessionIdentity::default(),
        }
    }

    /// Replace the user identifier.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.identity.user_id = user_id.into();
        self
    }

    /// Replace the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.identity.token = token;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL with an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Resolve an asset URL returned by the backend.
    ///
    /// Server-relative paths are anchored at the backend; absolute,
    /// protocol-relative, `data:` and `blob:` URLs pass through.
    #[must_use]
    pub fn asset_url(&self, url: &str) -> String {
        let url = url.trim();
        let absolute = url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with("//")
            || url.starts_with("data:")
            || url.starts_with("blob:");
        if absolute {
            url.to_string()
        } else {
            self.endpoint(url)
        }
    }
}
