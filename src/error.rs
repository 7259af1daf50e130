use thiserror::Error;

use crate::validate::ErrorKind;

/// Message shown to the user for any failure that carries no server text.
pub const GENERIC_CREATE_FAILURE: &str = "Error creating your shortlink.";

/// Failure talking to the shortening backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Network, timeout, non-2xx status or an undecodable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-zero status.
    #[error("{0}")]
    Application(String),

    /// The backend claimed success but the reply is missing required fields.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err.to_string())
    }
}

impl RemoteError {
    /// Text to put in front of the user. Only application errors carry a
    /// server message worth showing; everything else is generic.
    pub fn user_message(&self) -> &str {
        match self {
            RemoteError::Application(msg) if !msg.trim().is_empty() => msg,
            _ => GENERIC_CREATE_FAILURE,
        }
    }
}

/// Failure reading or writing the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of a failed form submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid input: {}", describe_kinds(.0))]
    Invalid(Vec<ErrorKind>),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SubmitError {
    /// One user-visible line per problem.
    pub fn user_messages(&self) -> Vec<&str> {
        match self {
            SubmitError::Invalid(kinds) => kinds.iter().map(|k| k.message()).collect(),
            SubmitError::Remote(err) => vec![err.user_message()],
        }
    }
}

fn describe_kinds(kinds: &[ErrorKind]) -> String {
    kinds
        .iter()
        .map(|k| format!("{k:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
