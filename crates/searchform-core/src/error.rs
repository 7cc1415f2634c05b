//! Error types for search form operations.
//!
//! One enum covers schema violations raised while building a query, problems
//! with form descriptors, and transport failures reported by an
//! [`HttpClient`](crate::http::HttpClient) implementation.

use thiserror::Error;

/// Main error type for search form operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value was set on a field the form does not declare
    #[error("Unknown field {0}")]
    UnknownField(String),

    /// A named form is missing from the form set
    #[error("Unknown form {0}")]
    UnknownForm(String),

    /// Form descriptor failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Form document could not be parsed
    #[error("Failed to parse form document: {0}")]
    ParseError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Timeout waiting for search API: {0}")]
    Timeout(String),

    /// Search API is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Specialized result type for search form operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::UnknownForm(_) => "UNKNOWN_FORM",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors raised by the caller misusing a form, as opposed
    /// to failures reported by the transport.
    #[must_use]
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::UnknownField(_) | Self::UnknownForm(_))
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::InternalError(_) | Self::ServiceUnavailable(_) | Self::Timeout(_)
        )
    }
}

// Conversions from external error types
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
