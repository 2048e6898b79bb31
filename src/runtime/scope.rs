// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The process-wide fetch scope
//!
//! [`Scope`] is the owned handle over the global fetch slot: the one place
//! the process looks up its fetch capability. Interception swaps the slot;
//! teardown restores it. The ambient [`fetch`] and [`fetch_url`] functions
//! are the drop-in adapter for callers that neither know nor care whether
//! an interceptor is installed.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::error::Result;
use crate::http::{FetchOptions, HttpTransport, Response, Transport};
use crate::intercept::FetchArgs;

use super::env::RuntimeKind;

lazy_static! {
    /// The global fetch slot, seeded lazily with the default transport
    static ref FETCH_SLOT: RwLock<Option<Arc<dyn Transport>>> = RwLock::new(None);
}

/// Owned handle over the resolved global scope
///
/// Resolution fails with [`crate::Error::UnsupportedEnvironment`] when no
/// known runtime shape is present; there is no retry.
#[derive(Debug, Clone)]
pub struct Scope {
    kind: RuntimeKind,
}

impl Scope {
    /// Resolve the current global scope
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            kind: RuntimeKind::detect()?,
        })
    }

    /// The runtime shape this scope belongs to
    pub fn kind(&self) -> RuntimeKind {
        self.kind
    }

    /// The fetch capability currently installed in the slot
    ///
    /// Seeds the slot with a default [`HttpTransport`] on first access.
    pub fn fetch(&self) -> Result<Arc<dyn Transport>> {
        if let Some(transport) = FETCH_SLOT.read().as_ref() {
            return Ok(Arc::clone(transport));
        }

        let mut slot = FETCH_SLOT.write();
        if let Some(transport) = slot.as_ref() {
            return Ok(Arc::clone(transport));
        }
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
        *slot = Some(Arc::clone(&transport));
        tracing::debug!(runtime = ?self.kind, "fetch slot seeded");
        Ok(transport)
    }

    /// Replace the installed fetch capability
    pub fn install(&self, transport: Arc<dyn Transport>) {
        *FETCH_SLOT.write() = Some(transport);
    }
}

/// Ambient fetch over the current scope
///
/// Behaviorally identical with and without an interceptor installed:
/// resolves with the transport's response, or rejects with the transport's
/// error (or a hook veto when intercepted).
pub async fn fetch(args: impl Into<FetchArgs>) -> Result<Response> {
    let scope = Scope::resolve()?;
    let capability = scope.fetch()?;
    capability.fetch(args.into()).await
}

/// Ambient fetch from a URL string and an optional options bag
pub async fn fetch_url(
    url: impl AsRef<str>,
    options: impl Into<Option<FetchOptions>>,
) -> Result<Response> {
    fetch(FetchArgs::resource(url, options)?).await
}
