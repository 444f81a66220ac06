// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # cool-http - HTTP orchestration layer
//!
//! Sits in front of an HTTP transport and adds the things every call in an
//! application tends to need, configured once per client.
//!
//! ## Features
//!
//! - Base URL: prefix every call's URL
//! - Global headers: attach headers to every call
//! - Cookie forwarding: copy a cookie's value into a custom header
//! - Interceptors: request and response chains that can rewrite headers or
//!   veto a call
//! - Uniform outcome: a value, a silent veto, or one [`HttpError`]
//! - Two delivery modes: awaited single result or a stream
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cool_http::{HeaderRecord, HttpOrchestrator, ReqwestTransport, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpOrchestrator::new(Arc::new(ReqwestTransport::new()?));
//!     client.register_base_url("https://api.example.com");
//!     client.register_global_header(HeaderRecord::new("x-client", "docs"));
//!
//!     match client.get("users/1", RequestOptions::new()).await? {
//!         Some(user) => println!("{}", user),
//!         None => println!("vetoed"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod network;

// Re-exports for convenience

// Orchestrator
pub use client::{ClientConfig, HttpOrchestrator, ResponseStream};

// Errors
pub use error::{Error, ErrorContext, HttpError, Result};

// HTTP
pub use http::{
    Body, CookieForwardRule, CookieReader, CookieSource, Exchange, FaultKind, GlobalHeaderSet,
    HeaderRecord, HttpClientConfig, NoCookies, ReqwestTransport, RequestOptions, ResponseBody,
    ResponseKind, SharedCookieString, Transport, TransportFault, TransportRequest,
    TransportResponse,
};

// Network
pub use network::{
    AuthHeaderInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    ResponseInterceptor,
};

/// cool-http version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
