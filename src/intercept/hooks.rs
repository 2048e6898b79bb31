// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lifecycle hook slots
//!
//! A [`Hooks`] value carries the closed set of four extension points the
//! dispatch pipeline knows about. Each slot is an optional callable;
//! dispatch is "invoke if present". The set is closed by construction;
//! there is no way to attach a hook outside this whitelist.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Result;
use crate::http::{Request, Response};

use super::abort::AbortController;

/// Hook invoked before a call is issued; an `Err` vetoes the call
pub type BeforeRequestHook = Arc<dyn Fn(&Request, &AbortController) -> Result<()> + Send + Sync>;

/// Fire-and-forget hook invoked once a call has been issued
pub type AfterRequestHook = Arc<dyn Fn(&Request, &AbortController) + Send + Sync>;

/// Async hook invoked when a call fulfills with a success status
pub type RequestSuccessHook =
    Arc<dyn Fn(Response, Request, AbortController) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Async hook invoked when a call fulfills with a failure status or rejects
pub type RequestFailureHook =
    Arc<dyn Fn(Failure, Request, AbortController) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// What the failure hook observed
#[derive(Debug, Clone)]
pub enum Failure {
    /// The transport fulfilled, but with a non-success status. The caller
    /// still receives this response through the normal resolution path.
    Status(Response),
    /// The transport rejected outright. The original error is rethrown to
    /// the caller after the hook runs; this payload is notification-only.
    Rejected {
        /// Rendered rejection
        message: String,
        /// Whether the rejection came from the cancellation controller
        aborted: bool,
    },
}

impl Failure {
    /// The fulfilled-but-not-ok response, if that is what failed
    pub fn status(&self) -> Option<&Response> {
        match self {
            Failure::Status(response) => Some(response),
            Failure::Rejected { .. } => None,
        }
    }

    /// Check if this was a transport-level rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, Failure::Rejected { .. })
    }

    /// Check if this was an abort
    pub fn is_abort(&self) -> bool {
        matches!(self, Failure::Rejected { aborted: true, .. })
    }
}

/// The four optional lifecycle hook slots
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) on_before_request: Option<BeforeRequestHook>,
    pub(crate) on_after_request: Option<AfterRequestHook>,
    pub(crate) on_request_success: Option<RequestSuccessHook>,
    pub(crate) on_request_failure: Option<RequestFailureHook>,
}

impl Hooks {
    /// Create an empty hook set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the before-request hook
    ///
    /// Runs synchronously before the underlying call is issued. Returning
    /// an `Err` vetoes the call: the error propagates to the caller and
    /// the transport is never invoked.
    pub fn on_before_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Request, &AbortController) -> Result<()> + Send + Sync + 'static,
    {
        self.on_before_request = Some(Arc::new(hook));
        self
    }

    /// Set the after-request hook
    ///
    /// Runs once the underlying call has been issued, before it settles.
    /// Request-issued bookkeeping only; it cannot observe the response.
    pub fn on_after_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Request, &AbortController) + Send + Sync + 'static,
    {
        self.on_after_request = Some(Arc::new(hook));
        self
    }

    /// Set the request-success hook
    ///
    /// Awaited before the outer call resolves; its output never replaces
    /// the response the caller sees.
    pub fn on_request_success<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Response, Request, AbortController) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.on_request_success = Some(Arc::new(move |response, request, controller| {
            let fut: BoxFuture<'static, Result<()>> = Box::pin(hook(response, request, controller));
            fut
        }));
        self
    }

    /// Set the request-failure hook
    ///
    /// Invoked for fulfilled non-success responses and for transport
    /// rejections. On the rejection path the original error is rethrown
    /// after the hook completes.
    pub fn on_request_failure<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Failure, Request, AbortController) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.on_request_failure = Some(Arc::new(move |failure, request, controller| {
            let fut: BoxFuture<'static, Result<()>> = Box::pin(hook(failure, request, controller));
            fut
        }));
        self
    }

    /// Check whether no hook is set
    pub fn is_empty(&self) -> bool {
        self.on_before_request.is_none()
            && self.on_after_request.is_none()
            && self.on_request_success.is_none()
            && self.on_request_failure.is_none()
    }

    /// Check whether the before-request slot is set
    pub fn has_before_request(&self) -> bool {
        self.on_before_request.is_some()
    }

    /// Check whether the after-request slot is set
    pub fn has_after_request(&self) -> bool {
        self.on_after_request.is_some()
    }

    /// Check whether the request-success slot is set
    pub fn has_request_success(&self) -> bool {
        self.on_request_success.is_some()
    }

    /// Check whether the request-failure slot is set
    pub fn has_request_failure(&self) -> bool {
        self.on_request_failure.is_some()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot(set: bool) -> &'static str {
            if set {
                "set"
            } else {
                "unset"
            }
        }
        f.debug_struct("Hooks")
            .field("on_before_request", &slot(self.on_before_request.is_some()))
            .field("on_after_request", &slot(self.on_after_request.is_some()))
            .field("on_request_success", &slot(self.on_request_success.is_some()))
            .field("on_request_failure", &slot(self.on_request_failure.is_some()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hooks() {
        let hooks = Hooks::new();
        assert!(hooks.is_empty());
        assert!(!hooks.has_before_request());
    }

    #[test]
    fn test_builder_sets_slots() {
        let hooks = Hooks::new()
            .on_before_request(|_req, _ctl| Ok(()))
            .on_request_success(|_res, _req, _ctl| async { Ok(()) });

        assert!(hooks.has_before_request());
        assert!(hooks.has_request_success());
        assert!(!hooks.has_after_request());
        assert!(!hooks.has_request_failure());
        assert!(!hooks.is_empty());
    }

    #[test]
    fn test_failure_accessors() {
        let rejected = Failure::Rejected {
            message: "connection reset".to_string(),
            aborted: false,
        };
        assert!(rejected.is_rejection());
        assert!(!rejected.is_abort());
        assert!(rejected.status().is_none());
    }
}
