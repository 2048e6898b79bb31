// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Runtime shape detection
//!
//! The interception layer binds to the global scope of whatever host it
//! runs inside. Four mutually exclusive shapes are recognized, probed in
//! fixed precedence: an embedding host signals its shape through an
//! ambient marker variable, and a plain native process always satisfies
//! the last shape. If nothing matches, resolution fails outright.

use crate::error::{Error, Result};

/// Marker a native-mobile-bridge embedding sets for its hosted code
pub const MOBILE_BRIDGE_MARKER: &str = "FETCHTAP_MOBILE_BRIDGE";

/// Marker a background-worker embedding sets for its hosted code
pub const WORKER_MARKER: &str = "FETCHTAP_WORKER_SCOPE";

/// Marker a windowed-shell embedding sets for its hosted code
pub const WINDOW_MARKER: &str = "FETCHTAP_WINDOW_SCOPE";

/// The runtime shape the process-wide scope belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    /// Hosted behind a native mobile bridge
    MobileBridge,
    /// Hosted inside a background worker
    Worker,
    /// Hosted inside a windowed shell
    Window,
    /// A plain OS process with its own module loader
    Process,
}

impl RuntimeKind {
    /// Detection precedence, highest first
    const PRECEDENCE: [RuntimeKind; 4] = [
        RuntimeKind::MobileBridge,
        RuntimeKind::Worker,
        RuntimeKind::Window,
        RuntimeKind::Process,
    ];

    /// Detect the current runtime shape from the ambient environment
    pub fn detect() -> Result<Self> {
        Self::detect_with(&ambient_probe)
    }

    /// Detect using a caller-supplied probe; first matching shape in
    /// precedence order wins
    pub(crate) fn detect_with(probe: &dyn Fn(RuntimeKind) -> bool) -> Result<Self> {
        Self::PRECEDENCE
            .into_iter()
            .find(|kind| probe(*kind))
            .ok_or(Error::UnsupportedEnvironment)
    }
}

/// Default probe over the process environment
fn ambient_probe(kind: RuntimeKind) -> bool {
    match kind {
        RuntimeKind::MobileBridge => env_marker(MOBILE_BRIDGE_MARKER),
        RuntimeKind::Worker => env_marker(WORKER_MARKER),
        RuntimeKind::Window => env_marker(WINDOW_MARKER),
        // a native process is always its own scope
        RuntimeKind::Process => true,
    }
}

fn env_marker(name: &str) -> bool {
    std::env::var_os(name).is_some()
}
