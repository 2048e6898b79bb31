// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for fetchtap
//!
//! The promise contract of the wrapped fetch is preserved: a call either
//! resolves with a [`crate::Response`] (including non-2xx statuses) or
//! fails with one of these errors.

use thiserror::Error;

/// Result type alias for fetchtap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fetchtap
#[derive(Error, Debug)]
pub enum Error {
    /// No known global scope with a fetch capability was found
    #[error("unsupported environment for fetch interception")]
    UnsupportedEnvironment,

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// In-flight call was aborted through its cancellation controller
    #[error("Request to {url} aborted")]
    Aborted { url: String },

    /// A lifecycle hook vetoed or failed a call
    #[error("Hook error: {0}")]
    Hook(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a hook error
    pub fn hook<S: Into<String>>(msg: S) -> Self {
        Error::Hook(msg.into())
    }

    /// Create an abort error for a URL
    pub fn aborted(url: impl Into<String>) -> Self {
        Error::Aborted { url: url.into() }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an abort
    pub fn is_abort(&self) -> bool {
        matches!(self, Error::Aborted { .. })
    }

    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Aborted { .. })
    }

    /// Check if this came from a lifecycle hook
    pub fn is_hook(&self) -> bool {
        matches!(self, Error::Hook(_))
    }

    /// Get the request URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Aborted { url } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
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
