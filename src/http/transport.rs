// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer
//!
//! [`Transport`] is the opaque fetch capability the interception layer
//! wraps: give it call arguments, get back a future that settles with a
//! [`Response`] or a transport-level error. [`HttpTransport`] is the
//! reqwest-backed implementation used as the process default.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::{ReferrerPolicy, Request};
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::intercept::FetchArgs;

/// The fetch capability contract
///
/// Implementations perform one outgoing call per invocation and must not
/// retain per-call state. The interception pipeline treats the transport
/// as a black box: it never inspects how the call is made, only whether
/// the returned future fulfills or rejects.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform an outgoing call
    async fn fetch(&self, args: FetchArgs) -> Result<Response>;
}

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("accept", HeaderValue::from_static("*/*"));
        default_headers.insert(
            "accept-encoding",
            HeaderValue::from_static("gzip, deflate, br"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

/// Reqwest-backed HTTP transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a new transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a new transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Execute a canonical request
    pub async fn execute(&self, request: Request) -> Result<Response> {
        // A signal that already fired means the call must never hit the wire.
        if let Some(ref signal) = request.signal {
            if signal.is_aborted() {
                return Err(Error::aborted(request.url_str()));
            }
        }

        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if request.referrer_policy != ReferrerPolicy::NoReferrer {
            if let Some(ref referrer) = request.referrer {
                builder = builder.header("referer", referrer.as_str());
            }
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "transport call");

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let redirected = response.url() != &request.url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(
            status,
            headers,
            body,
            final_url,
            redirected,
            response_time,
        ))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, args: FetchArgs) -> Result<Response> {
        self.execute(args.into_request()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(transport.config().max_redirects, 10);
    }

    #[tokio::test]
    async fn test_pre_aborted_signal_short_circuits() {
        use crate::intercept::CancelToken;

        let transport = HttpTransport::new().unwrap();
        let token = CancelToken::new();
        token.controller().abort();

        let mut request = Request::get("http://127.0.0.1:1/never")
            .unwrap()
            .header("x-test", "1");
        request.signal = Some(token.controller().signal());

        let err = transport.execute(request).await.unwrap_err();
        assert!(err.is_abort());
    }
}
