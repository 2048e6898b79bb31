// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Call-shape normalization
//!
//! The wrapped fetch accepts two call shapes: a URL plus an optional
//! options bag, or a pre-built [`Request`]. [`FetchArgs`] resolves the
//! shape once at the API boundary; [`normalize`] then produces exactly one
//! canonical request paired with a fresh cancellation token, regardless of
//! which shape came in.

use url::Url;

use crate::error::Result;
use crate::http::{FetchOptions, Request};

use super::abort::{AbortSignal, CancelToken};

/// The two legal call shapes
#[derive(Debug, Clone)]
pub enum FetchArgs {
    /// A URL and an optional options bag
    Resource {
        /// Target URL
        url: Url,
        /// Options bag; `None` means nothing beyond the URL was supplied
        options: Option<FetchOptions>,
    },
    /// A pre-built request
    Request(Request),
}

impl FetchArgs {
    /// Build the resource shape from a URL string
    pub fn resource(
        url: impl AsRef<str>,
        options: impl Into<Option<FetchOptions>>,
    ) -> Result<Self> {
        Ok(Self::Resource {
            url: Url::parse(url.as_ref())?,
            options: options.into(),
        })
    }

    /// The target URL of either shape
    pub fn url(&self) -> &Url {
        match self {
            FetchArgs::Resource { url, .. } => url,
            FetchArgs::Request(request) => &request.url,
        }
    }

    /// Collapse into a plain request without injecting a cancellation
    /// token; the unwrapped transport path uses this
    pub(crate) fn into_request(self) -> Request {
        match self {
            FetchArgs::Resource { url, options } => {
                Request::with_options(url, options.unwrap_or_default())
            }
            FetchArgs::Request(request) => request,
        }
    }
}

impl From<Request> for FetchArgs {
    fn from(request: Request) -> Self {
        FetchArgs::Request(request)
    }
}

impl From<Url> for FetchArgs {
    fn from(url: Url) -> Self {
        FetchArgs::Resource { url, options: None }
    }
}

impl From<(Url, FetchOptions)> for FetchArgs {
    fn from((url, options): (Url, FetchOptions)) -> Self {
        FetchArgs::Resource {
            url,
            options: Some(options),
        }
    }
}

/// Produce the canonical request and its cancellation token
///
/// Both call shapes converge here. The fresh token's signal always wins:
/// a caller-supplied signal in the options bag or on a pre-built request
/// is overwritten, so the hook-facing controller is the single authority
/// over this call's cancellation.
pub(crate) fn normalize(args: FetchArgs) -> (Request, CancelToken) {
    let token = CancelToken::new();
    let signal = token.controller().signal();

    let request = match args {
        FetchArgs::Request(request) => narrowed(request, signal),
        FetchArgs::Resource { url, options } => {
            let mut request = Request::with_options(url, options.unwrap_or_default());
            request.signal = Some(signal);
            request
        }
    };

    (request, token)
}

/// Narrowing copy of a pre-built request
///
/// Copies exactly the whitelisted transport fields and attaches the new
/// signal. Spelled field-by-field so growing [`Request`] forces a decision
/// here about whether the new field crosses the boundary.
fn narrowed(request: Request, signal: AbortSignal) -> Request {
    Request {
        method: request.method,
        url: request.url,
        headers: request.headers,
        body: request.body,
        mode: request.mode,
        credentials: request.credentials,
        cache: request.cache,
        redirect: request.redirect,
        referrer: request.referrer,
        referrer_policy: request.referrer_policy,
        integrity: request.integrity,
        signal: Some(signal),
        body_used: request.body_used,
    }
}
