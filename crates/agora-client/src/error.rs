//! Error types for the remote API facades

use crate::problem::{Conflict, ProblemDetail};
use thiserror::Error;

/// Errors from console/store API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or body-decoding failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, with the parsed problem detail when the
    /// body carried one
    #[error("HTTP {status}: {}", problem_summary(.problem))]
    Status {
        status: u16,
        problem: Option<ProblemDetail>,
    },

    /// Response was well-formed but missing a field this client requires
    #[error("missing field in response: {field}")]
    MissingField { field: String },

    /// Base URL could not be parsed
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn problem_summary(problem: &Option<ProblemDetail>) -> &str {
    problem
        .as_ref()
        .and_then(|p| p.message())
        .unwrap_or("unknown error")
}

impl ApiError {
    /// Create a missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// HTTP status code, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The parsed problem detail, if any
    pub fn problem(&self) -> Option<&ProblemDetail> {
        match self {
            ApiError::Status { problem, .. } => problem.as_ref(),
            _ => None,
        }
    }

    /// The already-exists conflict, if this error is one
    pub fn conflict(&self) -> Option<Conflict> {
        self.problem().and_then(ProblemDetail::conflict)
    }

    /// Whether this is a not-found response
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether a retry could plausibly succeed
    ///
    /// Transient transport failures and the usual retryable statuses
    /// qualify; client errors do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(err) => !err.is_builder() && !err.is_decode(),
            ApiError::Status { status, .. } => {
                matches!(status, 408 | 425 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}
