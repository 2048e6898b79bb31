// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The interception core
//!
//! Call-shape normalization, per-call cancellation tokens, the lifecycle
//! hook slots, and the singleton interceptor that wraps the process-wide
//! fetch capability.

mod abort;
mod hooks;
mod interceptor;
mod normalize;

pub use abort::{AbortController, AbortSignal, CancelToken};
pub use hooks::{
    AfterRequestHook, BeforeRequestHook, Failure, Hooks, RequestFailureHook, RequestSuccessHook,
};
pub use interceptor::FetchInterceptor;
pub use normalize::FetchArgs;
