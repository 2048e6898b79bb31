// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for fetchtap
//!
//! Canonical request/response values and the transport seam the
//! interception core wraps.

mod request;
mod response;
mod transport;

pub use request::{
    CacheMode, CredentialsMode, FetchOptions, RedirectMode, ReferrerPolicy, Request, RequestMode,
};
pub use response::{Response, SettleBranch};
pub use transport::{HttpTransport, Transport, TransportConfig};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("fetchtap/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    pub const ORIGIN: &str = "origin";
    pub const AUTHORIZATION: &str = "authorization";
}
