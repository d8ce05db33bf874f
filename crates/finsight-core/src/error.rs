//! Shared error type across finsight crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Record store unreachable or scan failed.
    Unavailable,
    /// Stored document could not be decoded into a record.
    MalformedData,
    /// Chart could not be rendered.
    RenderFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::MalformedData => "MALFORMED_DATA",
            ClientCode::RenderFailed => "RENDER_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FinsightError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FinsightError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("render failed: {0}")]
    Render(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl FinsightError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            FinsightError::BadRequest(_) => ClientCode::BadRequest,
            FinsightError::Unavailable(_) => ClientCode::Unavailable,
            FinsightError::MalformedRecord { .. } => ClientCode::MalformedData,
            FinsightError::Render(_) => ClientCode::RenderFailed,
            FinsightError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            FinsightError::Internal(_) => ClientCode::Internal,
        }
    }
}
