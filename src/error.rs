// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for fetch-request
//!
//! Failures from the underlying request primitive are carried through
//! unchanged; this crate adds only the few errors raised while building
//! a request descriptor.

use thiserror::Error;

/// Result type alias for fetch-request operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fetch-request
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed in the transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing or resolution failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization of a payload or parsing of a response failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (reading a file payload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied a header that cannot be sent
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Unknown value for a descriptor option (mode, credentials, cache)
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },

    /// Failure raised by a custom transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(option: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.into(),
            value: value.into(),
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this failure came from the network layer
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport(_))
    }

    /// Check if this is a JSON (de)serialization failure
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Serialization(_))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_classification() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();

        assert!(err.is_parse());
        assert!(!err.is_network());
    }

    #[test]
    fn test_transport_error() {
        let err = Error::transport("connection reset");

        assert!(err.is_network());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_invalid_header_message() {
        let err = Error::invalid_header("bad header", "invalid HTTP header name");
        assert_eq!(
            err.to_string(),
            "Invalid header 'bad header': invalid HTTP header name"
        );
    }
}
