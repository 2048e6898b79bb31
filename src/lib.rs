// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Fetchtap - Global Fetch Interception
//!
//! A process-wide HTTP fetch interception layer. Fetchtap replaces the
//! global fetch capability with a wrapped version that invokes lifecycle
//! hooks around every outgoing call, while staying behaviorally
//! transparent to callers: same call surface, same resolution contract,
//! same response shape.
//!
//! ## Features
//!
//! - Singleton lifecycle: one live interceptor per process, idempotent
//!   registration, clean restore on unregister
//! - Two call shapes, one canonical request: `(url, options)` and
//!   pre-built requests normalize identically before hooks observe them
//! - Per-call cancellation: every call carries a fresh controller/signal
//!   pair so hooks can abort exactly the call they are watching
//! - Four lifecycle hooks: before, after-issue, success, failure
//! - HTTP 4xx/5xx routed to the failure hook while the caller still
//!   resolves; transport rejections rethrown unchanged
//! - Environment detection: mobile bridge, worker, window, plain process
//!
//! ## Example
//!
//! ```rust,no_run
//! use fetchtap::{FetchInterceptor, Hooks};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interceptor = FetchInterceptor::register(
//!         Hooks::new()
//!             .on_before_request(|request, _controller| {
//!                 println!("-> {} {}", request.method, request.url);
//!                 Ok(())
//!             })
//!             .on_request_success(|response, request, _controller| async move {
//!                 println!("<- {} {}", response.status_code(), request.url);
//!                 Ok(())
//!             }),
//!     )?;
//!
//!     let response = fetchtap::fetch_url("https://example.com", None).await?;
//!     println!("{} bytes", response.body_len());
//!
//!     interceptor.unregister();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod intercept;
pub mod runtime;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    CacheMode, CredentialsMode, FetchOptions, HttpTransport, RedirectMode, ReferrerPolicy,
    Request, RequestMode, Response, SettleBranch, Transport, TransportConfig,
};

// Interception
pub use intercept::{
    AbortController, AbortSignal, CancelToken, Failure, FetchArgs, FetchInterceptor, Hooks,
};

// Runtime
pub use runtime::{fetch, fetch_url, RuntimeKind, Scope};

/// Register lifecycle hooks on the process-wide fetch capability
///
/// Convenience for [`FetchInterceptor::register`].
pub fn register(hooks: Hooks) -> Result<std::sync::Arc<FetchInterceptor>> {
    FetchInterceptor::register(hooks)
}

/// Fetchtap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
