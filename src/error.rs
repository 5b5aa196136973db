use thiserror::Error;

use crate::api::ApiError;
use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum TickkkError {
    #[error("ticket #{0} not found")]
    TicketNotFound(u64),

    #[error("user #{0} not found")]
    UserNotFound(u64),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    #[error("invalid role '{0}'")]
    InvalidRole(String),

    #[error("invalid queue filter '{0}'")]
    InvalidQueue(String),

    #[error("validation failed\n{0}")]
    Validation(FieldErrors),

    /// Login rejected or session token no longer valid.
    ///
    /// `cause` keeps the underlying rejection or transport failure for
    /// diagnostics; callers only need `message`.
    #[error("{message}")]
    Auth {
        message: String,
        #[source]
        cause: Option<Box<TickkkError>>,
    },

    #[error("not logged in. Run: tickkk login <username>")]
    NotAuthenticated,

    #[error("administrator access required")]
    Forbidden,

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TickkkError {
    /// The `error` field of the server's JSON error payload, if this error
    /// came from a rejected API call that carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TickkkError::Api(api) => api.server_message(),
            TickkkError::Auth {
                cause: Some(cause), ..
            } => cause.server_message(),
            _ => None,
        }
    }

    /// HTTP status of a rejected API call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TickkkError::Api(api) => Some(api.status.as_u16()),
            TickkkError::Http(e) => e.status().map(|s| s.as_u16()),
            TickkkError::Auth {
                cause: Some(cause), ..
            } => cause.status(),
            _ => None,
        }
    }

    /// Whether this error is a transport failure rather than a server answer.
    pub fn is_transport(&self) -> bool {
        match self {
            TickkkError::Http(_) => true,
            TickkkError::Auth {
                cause: Some(cause), ..
            } => cause.is_transport(),
            _ => false,
        }
    }

    /// Server message when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TickkkError>;
