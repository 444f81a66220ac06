// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for cool-http
//!
//! The request pipeline raises exactly one kind of error, [`HttpError`],
//! which carries the method, resolved URL, status and a body snapshot.
//! Everything else in [`Error`] comes from constructing transports or from
//! decoding values after a call has already succeeded.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for cool-http operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cool-http
#[derive(Error, Debug)]
pub enum Error {
    /// A call completed with a failure status or a transport fault
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Building the underlying reqwest client failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Failed call, raised when the exchange is not ok and no response
/// interceptor vetoed delivery.
///
/// Transport faults surface with `status == 0` and the fault message as body.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Failed to call api {method} {url}, status code: {status}")]
pub struct HttpError {
    /// HTTP method token
    pub method: String,
    /// Resolved (base-URL-prefixed) URL
    pub url: String,
    /// Status code, 0 for transport faults
    pub status: u16,
    /// Reason phrase reported by the transport
    pub status_text: String,
    /// Response body as text
    pub body: String,
}

impl HttpError {
    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Check if the exchange never produced a status line
    pub fn is_transport_fault(&self) -> bool {
        self.status == 0
    }
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came out of the request pipeline
    pub fn is_http_failure(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Get the pipeline error, if this is one
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(e) => Some(e),
            _ => None,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Http(e) => Some(&e.url),
            Error::Transport(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                // Keep the structured error so callers can still inspect it
                Error::Http(http) => Error::Http(http),
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> HttpError {
        HttpError {
            method: "GET".to_string(),
            url: "https://api.example.com/users/1".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
            body: "missing".to_string(),
        }
    }

    #[test]
    fn test_http_error_display() {
        let err = not_found();
        assert_eq!(
            err.to_string(),
            "Failed to call api GET https://api.example.com/users/1, status code: 404"
        );
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert!(!err.is_transport_fault());
    }

    #[test]
    fn test_error_accessors() {
        let err: Error = not_found().into();
        assert!(err.is_http_failure());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.url(), Some("https://api.example.com/users/1"));
        assert_eq!(err.as_http().map(|e| e.body.as_str()), Some("missing"));

        let other = Error::config("bad proxy");
        assert!(!other.is_http_failure());
        assert_eq!(other.status_code(), None);
        assert_eq!(other.url(), None);
    }

    #[test]
    fn test_context_keeps_http_errors() {
        let res: std::result::Result<(), HttpError> = Err(not_found());
        let err = res.context("fetching user").unwrap_err();
        assert_eq!(err.status_code(), Some(404));

        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("loading").unwrap_err();
        assert_eq!(err.to_string(), "loading: boom");
    }
}
