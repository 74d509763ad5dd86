//! Error types shared by the stores and their remote collaborators.

use thiserror::Error;

/// Failure reported by a remote collaborator (REST backend, test doubles).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never reached the server, or no response came back.
    #[error("server unreachable: {0}")]
    Unreachable(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {code}")]
    Status { code: u16, message: Option<String> },
    /// The response arrived but its body could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),
}

impl TransportError {
    /// A status failure carrying a server-supplied message.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        TransportError::Status {
            code,
            message: Some(message.into()),
        }
    }

    /// The 404 a remote collection reports for an unknown id.
    pub fn not_found(id: &str) -> Self {
        Self::status(404, format!("{} not found", id))
    }
}

/// Classification of a [`StoreError`], as exposed to the UI through `last_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Server,
    Validation,
    Unknown,
}

/// A classified failure of a store operation.
///
/// Every variant carries the human-readable message that was also sent to the
/// notifier. Server-supplied messages win over the operation's default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Server { code: u16, message: String },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    /// Classify a transport failure. `fallback` is used when the server did
    /// not supply a message of its own.
    pub fn classify(err: &TransportError, fallback: &str) -> Self {
        match err {
            TransportError::Unreachable(_) => StoreError::Network(fallback.to_string()),
            TransportError::Status { code, message } => {
                let message = message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(fallback)
                    .to_string();
                if *code == 422 {
                    StoreError::Validation(message)
                } else {
                    StoreError::Server {
                        code: *code,
                        message,
                    }
                }
            }
            TransportError::Decode(_) => StoreError::Unknown(fallback.to_string()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Network(_) => ErrorKind::Network,
            StoreError::Server { .. } => ErrorKind::Server,
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StoreError::Network(message)
            | StoreError::Validation(message)
            | StoreError::Unknown(message)
            | StoreError::Server { message, .. } => message,
        }
    }

    /// HTTP status code, for server-classified errors.
    pub fn code(&self) -> Option<u16> {
        match self {
            StoreError::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }
}

/// Failure to load the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
