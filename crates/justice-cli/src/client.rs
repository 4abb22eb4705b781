//! API context construction and CLI error types.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use justice_client::{ApiClient, ApiError, ClientConfig};
use reqwest::{Client, Url};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::InvalidRequest(message) => Self::Validation(message),
            other => Self::Failure(other.into()),
        }
    }
}

/// Connection settings gathered from flags and environment.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionOptions {
    pub(crate) api_url: Url,
    pub(crate) user_id: String,
    pub(crate) token: Option<String>,
    pub(crate) timeout: Duration,
}

/// Application context passed to command handlers.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) client: ApiClient,
}

impl AppContext {
    /// Build the API client with the configured timeout and identity.
    pub(crate) fn connect(options: ConnectionOptions) -> CliResult<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        let config = ClientConfig::new(options.api_url.as_str())
            .with_user_id(options.user_id)
            .with_token(options.token);

        Ok(Self {
            client: ApiClient::with_http_client(config, http),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_server(base_url: &str, user_id: &str) -> Self {
        Self {
            client: ApiClient::new(ClientConfig::new(base_url).with_user_id(user_id)),
        }
    }

    /// Session user id, required by user-scoped commands.
    pub(crate) fn user_id(&self) -> CliResult<&str> {
        self.client
            .identity()
            .user_id()
            .ok_or_else(|| CliError::validation("a user id is required (--user-id or JUSTICE_USER_ID)"))
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_validation_from_failure() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
    }

    #[test]
    fn api_errors_map_to_cli_errors() {
        let invalid: CliError = ApiError::InvalidRequest("referrer must not be empty".into()).into();
        assert!(matches!(invalid, CliError::Validation(ref msg) if msg.contains("referrer")));

        let status: CliError = ApiError::Status {
            status: 503,
            body: "maintenance".into(),
        }
        .into();
        assert_eq!(status.exit_code(), 3);
        assert!(status.display_message().contains("503"));
    }

    #[test]
    fn parse_url_reports_bad_input() {
        assert!(parse_url("http://127.0.0.1:8000").is_ok());
        let err = parse_url("not a url").err().unwrap_or_default();
        assert!(err.contains("invalid URL 'not a url'"));
    }

    #[test]
    fn connect_applies_identity() -> Result<(), CliError> {
        let ctx = AppContext::connect(ConnectionOptions {
            api_url: parse_url("http://api.local:8000/").map_err(CliError::validation)?,
            user_id: "42".into(),
            token: Some("secret".into()),
            timeout: Duration::from_secs(5),
        })?;
        assert_eq!(ctx.client.config().base_url(), "http://api.local:8000");
        assert_eq!(ctx.user_id()?, "42");
        assert_eq!(ctx.client.identity().token(), Some("secret"));
        Ok(())
    }

    #[test]
    fn missing_user_id_is_a_validation_error() -> Result<(), CliError> {
        let ctx = AppContext::connect(ConnectionOptions {
            api_url: parse_url("http://api.local").map_err(CliError::validation)?,
            user_id: String::new(),
            token: None,
            timeout: Duration::from_secs(5),
        })?;
        let err = ctx.user_id().err().map(|err| err.exit_code());
        assert_eq!(err, Some(2));
        Ok(())
    }
}
