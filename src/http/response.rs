// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types
//!
//! A [`Response`] is what the wrapped fetch resolves with, whether or not
//! an interceptor is installed. Every fulfilled response also knows which
//! dispatch branch it routes to: success-hook territory for 2xx statuses,
//! failure-hook territory for everything else, with the response still
//! delivered to the caller either way.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Which hook a fulfilled response routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleBranch {
    /// Success-hook territory (2xx)
    Success,
    /// Failure-hook territory (non-2xx); a fulfilled promise path, the
    /// caller still resolves with the response
    Failure,
}

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The dispatch branch this response routes to
    pub fn settle_branch(&self) -> SettleBranch {
        if self.ok() {
            SettleBranch::Success
        } else {
            SettleBranch::Failure
        }
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|_| Error::other(format!("response body from {} is not valid UTF-8", self.url)))
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get content length
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")?.parse().ok()
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }
}
