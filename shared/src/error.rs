use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Http,
    Deserialization,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Http => "HTTP_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
        }
    }
}

/// Why a retrieval cycle failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {code}")]
    Status { code: u16 },

    #[error("malformed sight payload: {0}")]
    Decode(String),
}

impl FetchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Network,
            Self::Status { .. } => ErrorKind::Http,
            Self::Decode(_) => ErrorKind::Deserialization,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowserError {
    #[error("zone '{0}' is not in the configured zone set")]
    UnknownZone(String),
}

/// What the shell shows for a failed retrieval. The message is always the
/// configured generic text; details stay in the logs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub code: String,
    pub is_retryable: bool,
}

impl UserFacingError {
    #[must_use]
    pub fn new(error: &FetchError, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: error.code().to_string(),
            is_retryable: true,
        }
    }
}
