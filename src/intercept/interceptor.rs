// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The fetch interceptor
//!
//! [`FetchInterceptor`] owns the captured original transport and the hook
//! set, and drives the per-call dispatch pipeline. A process-wide registry
//! enforces the single-live-instance rule: `register` is a singleton gate,
//! not an additive merge.

use std::sync::Arc;

use futures::future::{Abortable, Aborted};
use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::http::{Response, SettleBranch, Transport};
use crate::runtime::Scope;

use super::abort::AbortController;
use super::hooks::{Failure, Hooks};
use super::normalize::{normalize, FetchArgs};

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

/// Zero-or-one slot holding the live interceptor
struct Registry {
    slot: RwLock<Option<Arc<FetchInterceptor>>>,
}

impl Registry {
    fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    fn active(&self) -> Option<Arc<FetchInterceptor>> {
        self.slot.read().clone()
    }

    fn register(&self, hooks: Hooks) -> Result<Arc<FetchInterceptor>> {
        let mut slot = self.slot.write();

        // Singleton gate: a live instance wins and the new hooks are
        // discarded, not merged.
        if let Some(active) = slot.as_ref() {
            return Ok(Arc::clone(active));
        }

        let scope = Scope::resolve()?;
        let original = scope.fetch()?;
        let interceptor = Arc::new(FetchInterceptor {
            scope,
            original,
            hooks,
        });
        FetchInterceptor::hijack(&interceptor);
        *slot = Some(Arc::clone(&interceptor));
        Ok(interceptor)
    }

    fn clear_if(&self, interceptor: &FetchInterceptor) {
        let mut slot = self.slot.write();
        if slot
            .as_ref()
            .map_or(false, |active| std::ptr::eq(Arc::as_ptr(active), interceptor))
        {
            *slot = None;
        }
    }

    #[cfg(test)]
    fn reset(&self) {
        *self.slot.write() = None;
    }
}

/// Process-wide fetch interceptor
///
/// Created through [`FetchInterceptor::register`]; at most one live
/// instance exists at a time. While active, every call through the scope's
/// fetch slot flows through the dispatch pipeline and the registered
/// hooks. [`FetchInterceptor::unregister`] restores the captured original
/// capability.
pub struct FetchInterceptor {
    /// Resolved global scope; immutable after construction
    scope: Scope,
    /// The fetch capability captured at construction, used for real calls
    /// and restored on teardown
    original: Arc<dyn Transport>,
    /// Registered lifecycle hooks
    hooks: Hooks,
}

impl FetchInterceptor {
    /// The advertised hook whitelist, in dispatch order
    pub const HOOK_NAMES: [&'static str; 4] = [
        "on_before_request",
        "on_after_request",
        "on_request_success",
        "on_request_failure",
    ];

    /// Register hooks and return the live interceptor
    ///
    /// If an interceptor is already active it is returned unchanged and
    /// `hooks` is dropped. Otherwise the global scope is resolved, the
    /// current fetch capability captured, and the wrapped capability
    /// installed in its place.
    pub fn register(hooks: Hooks) -> Result<Arc<Self>> {
        REGISTRY.register(hooks)
    }

    /// The currently registered interceptor, if any
    pub fn active() -> Option<Arc<Self>> {
        REGISTRY.active()
    }

    /// Restore the original fetch capability and release the singleton
    ///
    /// Safe to call more than once and on an instance that is no longer
    /// the active one: it restores its own captured capability and leaves
    /// any other live registration in the registry untouched.
    pub fn unregister(&self) {
        self.scope.install(Arc::clone(&self.original));
        REGISTRY.clear_if(self);
        tracing::debug!("fetch capability restored");
    }

    /// The registered hook set
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// The scope this interceptor is bound to
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Install the wrapped capability into the scope's fetch slot
    fn hijack(this: &Arc<Self>) {
        this.scope.install(Arc::new(InterceptedFetch {
            interceptor: Arc::clone(this),
        }));
        tracing::debug!(runtime = ?this.scope.kind(), "fetch capability intercepted");
    }

    /// Per-call dispatch pipeline
    ///
    /// Strictly sequential for one call: normalize, before-hook (veto
    /// point), issue the transport call, after-hook, then route the
    /// settlement to the success or failure hook. The caller always
    /// receives the original resolution: the response as fulfilled by the
    /// transport, or the original rejection rethrown.
    pub(crate) async fn dispatch(&self, args: FetchArgs) -> Result<Response> {
        let (request, token) = normalize(args);
        let (controller, registration) = token.into_parts();

        if let Some(hook) = &self.hooks.on_before_request {
            // An Err here vetoes the call; the transport is never invoked.
            hook(&request, &controller)?;
        }

        let transport = Arc::clone(&self.original);
        let outbound = request.clone();
        let in_flight = tokio::spawn(Abortable::new(
            async move { transport.fetch(FetchArgs::Request(outbound)).await },
            registration,
        ));

        if let Some(hook) = &self.hooks.on_after_request {
            hook(&request, &controller);
        }

        let settled = match in_flight.await {
            Ok(outcome) => outcome,
            // A panicked transport task surfaces as a plain rejection.
            Err(join) => Ok(Err(Error::other(format!("transport task failed: {}", join)))),
        };

        match settled {
            Ok(Ok(response)) => {
                match response.settle_branch() {
                    SettleBranch::Success => {
                        if let Some(hook) = &self.hooks.on_request_success {
                            hook(response.clone(), request.clone(), controller.clone()).await?;
                        }
                    }
                    SettleBranch::Failure => {
                        if let Some(hook) = &self.hooks.on_request_failure {
                            hook(
                                Failure::Status(response.clone()),
                                request.clone(),
                                controller.clone(),
                            )
                            .await?;
                        }
                    }
                }
                Ok(response)
            }
            Ok(Err(err)) => {
                tracing::trace!(url = %request.url, error = %err, "transport rejected");
                self.notify_failure(&err, &request, &controller).await?;
                Err(err)
            }
            Err(Aborted) => {
                let err = Error::aborted(request.url_str());
                tracing::trace!(url = %request.url, "call aborted");
                self.notify_failure(&err, &request, &controller).await?;
                Err(err)
            }
        }
    }

    /// Run the failure hook for a rejection; the original error is
    /// rethrown by the caller of this helper
    async fn notify_failure(
        &self,
        err: &Error,
        request: &crate::http::Request,
        controller: &AbortController,
    ) -> Result<()> {
        if let Some(hook) = &self.hooks.on_request_failure {
            hook(
                Failure::Rejected {
                    message: err.to_string(),
                    aborted: err.is_abort(),
                },
                request.clone(),
                controller.clone(),
            )
            .await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FetchInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchInterceptor")
            .field("scope", &self.scope)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// The wrapped capability installed in the scope's fetch slot
struct InterceptedFetch {
    interceptor: Arc<FetchInterceptor>,
}

#[async_trait::async_trait]
impl Transport for InterceptedFetch {
    async fn fetch(&self, args: FetchArgs) -> Result<Response> {
        self.interceptor.dispatch(args).await
    }
}
