//! Error types for userdir.
//!
//! This module provides a unified error type with explicit variants for
//! transport, remote API, snapshot parsing, lookup, validation, and storage
//! failures.

use std::fmt;
use thiserror::Error;

use crate::types::RecordId;

/// The unified error type for userdir operations.
///
/// `Transport` and `Remote` together make up what callers treat as a failed
/// remote fetch; see [`Error::is_remote_fetch`].
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The search API answered with a non-success status.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A snapshot or response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The record targeted by a mutation does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Form input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Persistent storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed ids, URLs, or storage keys.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A fetch result arrived after it was superseded or cancelled.
    #[error("stale fetch result (generation {generation}, current {current})")]
    StaleFetch { generation: u64, current: u64 },
}

impl Error {
    /// Returns true if this error came from populating the collection remotely.
    pub fn is_remote_fetch(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Remote(_))
    }

    /// Returns true if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Non-success response from the search API.
#[derive(Debug)]
pub struct RemoteError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if it sent one.
    pub message: Option<String>,
}

impl RemoteError {
    /// Create a new remote error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Returns true if the API refused the request for rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
            || (self.status == 403
                && self
                    .message
                    .as_deref()
                    .is_some_and(|m| m.to_ascii_lowercase().contains("rate limit")))
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

/// Decoding failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The persisted snapshot is not a valid record array.
    #[error("malformed snapshot under key '{key}': {source}")]
    Snapshot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote response body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Response { message: String },
}

/// Lookup misses.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// No record with this id.
    #[error("no record with id {0}")]
    Id(RecordId),

    /// No record with this login.
    #[error("no record with login '{0}'")]
    Login(String),
}

/// Persistent storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem IO failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The in-memory backend's lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Input validation errors for identifiers and configuration values.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record id.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Storage key that cannot be used as a file name.
    #[error("invalid storage key '{key}': {reason}")]
    StorageKey { key: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// The form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Login,
    Score,
    Url,
    Avatar,
}

impl Field {
    /// Returns the field name as shown to the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Login => "login",
            Field::Score => "score",
            Field::Url => "url",
            Field::Avatar => "avatar",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check on one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every failed check from one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check.
    pub fn push(&mut self, field: Field, reason: impl Into<String>) {
        self.0.push(FieldError::new(field, reason));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the individual field errors in the order they were found.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true if any check on `field` failed.
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` if nothing failed, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
