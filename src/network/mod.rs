// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request and response interception
//!
//! Interceptor traits, ordered chains and a couple of stock interceptors.

mod interceptor;
mod interceptor_trait;

pub use interceptor::{InterceptorChain, InterceptorRegistry};
pub use interceptor_trait::{
    AuthHeaderInjector, InterceptAction, RequestInterceptor, RequestLogger, ResponseInterceptor,
};
