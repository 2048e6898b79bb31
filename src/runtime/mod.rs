// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Global scope resolution and the ambient fetch adapter

mod env;
pub(crate) mod scope;

pub use env::{RuntimeKind, MOBILE_BRIDGE_MARKER, WINDOW_MARKER, WORKER_MARKER};
pub use scope::{fetch, fetch_url, Scope};
