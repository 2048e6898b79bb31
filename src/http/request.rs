// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Canonical HTTP request types
//!
//! [`Request`] is the single transport-level description every call is
//! normalized into before any hook observes it. Both call shapes (a URL
//! plus an options bag, or a pre-built request) converge on this type.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::intercept::AbortSignal;

/// Canonical HTTP request representation
///
/// Carries the fixed whitelist of transport fields. Anything outside this
/// set is dropped during normalization.
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
    /// Request mode
    pub mode: RequestMode,
    /// Credentials mode
    pub credentials: CredentialsMode,
    /// Cache mode
    pub cache: CacheMode,
    /// Redirect handling
    pub redirect: RedirectMode,
    /// Referrer value
    pub referrer: Option<String>,
    /// Referrer policy
    pub referrer_policy: ReferrerPolicy,
    /// Subresource integrity metadata
    pub integrity: Option<String>,
    /// Cancellation signal bound to this call
    pub signal: Option<AbortSignal>,
    /// Whether the body has already been consumed
    pub body_used: bool,
}

/// Request mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// Cross-origin requests allowed with CORS semantics
    #[default]
    Cors,
    /// Cross-origin requests without CORS
    NoCors,
    /// Same-origin requests only
    SameOrigin,
    /// Top-level navigation
    Navigate,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send credentials only to same-origin requests
    #[default]
    SameOrigin,
    /// Always send credentials
    Include,
    /// Never send credentials
    Omit,
}

/// Cache mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Standard HTTP caching rules
    #[default]
    Default,
    /// Bypass the cache entirely
    NoStore,
    /// Always revalidate
    Reload,
    /// Revalidate before using a cached response
    NoCache,
    /// Prefer the cache even if stale
    ForceCache,
    /// Fail unless a cached response exists
    OnlyIfCached,
}

/// Redirect handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectMode {
    /// Follow redirects transparently
    #[default]
    Follow,
    /// Treat a redirect as an error
    Error,
    /// Surface the redirect response as-is
    Manual,
}

/// Referrer policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferrerPolicy {
    /// No policy set; the transport decides
    #[default]
    Unset,
    /// Never send a referrer
    NoReferrer,
    /// Omit the referrer on HTTPS -> HTTP downgrades
    NoReferrerWhenDowngrade,
    /// Send only the origin
    Origin,
    /// Full referrer same-origin, origin only cross-origin
    OriginWhenCrossOrigin,
    /// Full referrer for same-origin requests only
    SameOrigin,
    /// Origin only, and only when not downgrading
    StrictOrigin,
    /// Combination of strict-origin and origin-when-cross-origin
    StrictOriginWhenCrossOrigin,
    /// Always send the full referrer
    UnsafeUrl,
}

/// Options bag for the `(url, options)` call shape
///
/// Every field is optional; absent fields fall back to the [`Request`]
/// defaults during the shallow merge. A caller-supplied `signal` is
/// overwritten by the per-call cancellation token.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Request method
    pub method: Option<Method>,
    /// Request headers
    pub headers: Option<HeaderMap>,
    /// Request body
    pub body: Option<Bytes>,
    /// Request mode
    pub mode: Option<RequestMode>,
    /// Credentials mode
    pub credentials: Option<CredentialsMode>,
    /// Cache mode
    pub cache: Option<CacheMode>,
    /// Redirect handling
    pub redirect: Option<RedirectMode>,
    /// Referrer value
    pub referrer: Option<String>,
    /// Referrer policy
    pub referrer_policy: Option<ReferrerPolicy>,
    /// Subresource integrity metadata
    pub integrity: Option<String>,
    /// Caller-supplied cancellation signal
    pub signal: Option<AbortSignal>,
}

impl FetchOptions {
    /// Create an empty options bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers
                .get_or_insert_with(HeaderMap::new)
                .insert(name, value);
        }
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Set the cancellation signal
    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
            mode: RequestMode::default(),
            credentials: CredentialsMode::default(),
            cache: CacheMode::default(),
            redirect: RedirectMode::default(),
            referrer: None,
            referrer_policy: ReferrerPolicy::default(),
            integrity: None,
            signal: None,
            body_used: false,
        })
    }

    /// Build a request from a URL and an options bag
    ///
    /// Shallow merge: every provided option wins over the default; absent
    /// options are not invented.
    pub fn with_options(url: Url, options: FetchOptions) -> Self {
        Self {
            method: options.method.unwrap_or(Method::GET),
            url,
            headers: options.headers.unwrap_or_default(),
            body: options.body,
            mode: options.mode.unwrap_or_default(),
            credentials: options.credentials.unwrap_or_default(),
            cache: options.cache.unwrap_or_default(),
            redirect: options.redirect.unwrap_or_default(),
            referrer: options.referrer,
            referrer_policy: options.referrer_policy.unwrap_or_default(),
            integrity: options.integrity,
            signal: options.signal,
            body_used: false,
        }
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        self = self.header("content-type", "application/json");
        Ok(self)
    }

    /// Set form body
    pub fn form(mut self, data: &HashMap<String, String>) -> Self {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in data {
            serializer.append_pair(name, value);
        }
        self.body = Some(Bytes::from(serializer.finish()));
        self = self.header("content-type", "application/x-www-form-urlencoded");
        self
    }

    /// Set the request mode
    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    /// Set cache mode
    pub fn cache(mut self, mode: CacheMode) -> Self {
        self.cache = mode;
        self
    }

    /// Set redirect handling
    pub fn redirect(mut self, mode: RedirectMode) -> Self {
        self.redirect = mode;
        self
    }

    /// Set the referrer
    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Set the referrer policy
    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.referrer_policy = policy;
        self
    }

    /// Set integrity metadata
    pub fn integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get the host
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Get the origin
    pub fn origin(&self) -> String {
        format!(
            "{}://{}{}",
            self.url.scheme(),
            self.url.host_str().unwrap_or(""),
            self.url
                .port()
                .map(|p| format!(":{}", p))
                .unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
        assert!(req.signal.is_none());
        assert!(!req.body_used);
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("x-custom", "value");
        assert_eq!(
            req.headers.get("x-custom").map(|v| v.to_str().unwrap()),
            Some("value")
        );
    }

    #[test]
    fn test_request_origin() {
        let req = Request::get("https://example.com:8080/path").unwrap();
        assert_eq!(req.origin(), "https://example.com:8080");
    }

    #[test]
    fn test_with_options_merge() {
        let url = Url::parse("https://example.com/submit").unwrap();
        let options = FetchOptions::new()
            .method(Method::POST)
            .header("content-type", "text/plain")
            .body("payload");

        let req = Request::with_options(url, options);

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.as_deref(), Some(b"payload".as_slice()));
        // unspecified options fall back to defaults, nothing is invented
        assert_eq!(req.mode, RequestMode::Cors);
        assert_eq!(req.credentials, CredentialsMode::SameOrigin);
        assert_eq!(req.cache, CacheMode::Default);
        assert_eq!(req.redirect, RedirectMode::Follow);
        assert!(req.referrer.is_none());
        assert!(req.integrity.is_none());
    }

    #[test]
    fn test_with_options_empty_bag() {
        let url = Url::parse("http://x/y").unwrap();
        let req = Request::with_options(url, FetchOptions::default());

        assert_eq!(req.method, Method::GET);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_form_body() {
        let mut data = HashMap::new();
        data.insert("q".to_string(), "hello world".to_string());

        let req = Request::post("https://example.com/search").unwrap().form(&data);

        assert_eq!(req.body.as_deref(), Some(b"q=hello+world".as_slice()));
        assert_eq!(
            req.headers.get("content-type").map(|v| v.to_str().unwrap()),
            Some("application/x-www-form-urlencoded")
        );
    }
}
