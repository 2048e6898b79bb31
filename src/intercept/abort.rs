// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call cancellation plumbing
//!
//! Every dispatched call gets a fresh [`CancelToken`]: an
//! [`AbortController`] handed to the lifecycle hooks and the registration
//! the pipeline wires into the in-flight transport future. Aborting the
//! controller rejects the call it observes; other calls are unaffected.

use futures::future::{AbortHandle, AbortRegistration};

/// Hook-facing cancellation controller
///
/// Cloning yields another handle onto the same call; aborting any clone
/// aborts the one in-flight call the token was created for.
#[derive(Debug, Clone)]
pub struct AbortController {
    handle: AbortHandle,
}

impl AbortController {
    /// Abort the in-flight call
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Check whether the call has been aborted
    pub fn is_aborted(&self) -> bool {
        self.handle.is_aborted()
    }

    /// Get the observe-only signal for this call
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            handle: self.handle.clone(),
        }
    }
}

/// Request-facing abort signal
///
/// Attached to the canonical request so the transport (and anything else
/// holding the request) can observe cancellation without being able to
/// trigger it.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    handle: AbortHandle,
}

impl AbortSignal {
    /// Check whether the call has been aborted
    pub fn is_aborted(&self) -> bool {
        self.handle.is_aborted()
    }
}

/// Controller/registration pair owned by a single call invocation
///
/// Discarded once the call settles; never reused across calls.
pub struct CancelToken {
    controller: AbortController,
    registration: AbortRegistration,
}

impl CancelToken {
    /// Create a fresh token
    pub fn new() -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self {
            controller: AbortController { handle },
            registration,
        }
    }

    /// Get the controller
    pub fn controller(&self) -> &AbortController {
        &self.controller
    }

    /// Split into the controller and the registration to wire into the
    /// in-flight future
    pub fn into_parts(self) -> (AbortController, AbortRegistration) {
        (self.controller, self.registration)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
