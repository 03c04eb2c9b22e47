//! Error types for the keeper toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, remote-service, validation, and concurrency failures.

use std::fmt;
use thiserror::Error;

use crate::types::RecordId;

/// The unified error type for keeper operations.
///
/// Every asynchronous path in the toolkit resolves to this type; nothing
/// is thrown past the caller as a panic.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The remote service answered with a non-success status.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Operator input failed validation; never reaches the network.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// A mutation on this record is already in flight.
    #[error("an action is already in flight for record '{id}'")]
    ActionInFlight {
        /// The record that is currently busy.
        id: RecordId,
    },

    /// Input validation errors for constructed types (URLs, ids).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// True when this error came from the remote service or the wire,
    /// i.e. a settled remote call rather than a local rejection.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Remote(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the remote service.
#[derive(Debug, Clone)]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if the service sent one).
    pub code: Option<String>,
    /// Error message from the service.
    pub message: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

impl RemoteError {
    /// Create a new remote error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Convenience constructor for a 404 on a missing record.
    pub fn not_found(id: &RecordId) -> Self {
        Self::new(
            404,
            Some("RecordNotFound".to_string()),
            Some(format!("Record {} not found", id)),
        )
    }

    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// The field is required and was empty after trimming.
    #[error("value is required")]
    Required,

    /// The value is not one of the allowed enum values.
    #[error("must be one of: {allowed}")]
    InvalidEnum {
        /// Comma-separated allowed values, for display.
        allowed: &'static str,
    },

    /// The value is outside the accepted range or shape.
    #[error("{0}")]
    OutOfRange(String),
}

/// A validation failure on one field of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed.
    pub field: &'static str,
    /// Why it failed.
    pub issue: Issue,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.issue)
    }
}

/// All field errors from validating one draft.
///
/// Guaranteed non-empty; validation collects every failing field rather
/// than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Wrap a collected list of field errors.
    ///
    /// Callers must only construct this from a non-empty list.
    pub fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    /// The individual field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Look up the issue for a specific field, if it failed.
    pub fn for_field(&self, field: &str) -> Option<&Issue> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.issue)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid service URL format.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Invalid record id format.
    #[error("invalid record id: {reason}")]
    RecordId { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display() {
        let err = RemoteError::new(500, None, Some("boom".to_string()));
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = RemoteError::new(404, Some("RecordNotFound".to_string()), None);
        assert_eq!(err.to_string(), "HTTP 404 [RecordNotFound]");
    }

    #[test]
    fn field_errors_display_joins_all() {
        let errs = FieldErrors::new(vec![
            FieldError {
                field: "name",
                issue: Issue::Required,
            },
            FieldError {
                field: "age",
                issue: Issue::OutOfRange("must not be negative".to_string()),
            },
        ]);
        assert_eq!(
            errs.to_string(),
            "name: value is required; age: must not be negative"
        );
        assert_eq!(errs.for_field("name"), Some(&Issue::Required));
        assert!(errs.for_field("gender").is_none());
    }
}
