// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP data layer for cool-http
//!
//! Header records, the cookie reader, request/response shapes, the
//! transport capability and a reqwest-backed transport.

mod client;
mod cookie;
mod header;
mod request;
mod response;
mod transport;

pub use client::{HttpClientConfig, ReqwestTransport};
pub use cookie::{
    CookieForwardRule, CookieMap, CookieReader, CookieSource, NoCookies, SharedCookieString,
};
pub use header::{
    append_records, apply_record_changes, from_records, to_records, GlobalHeaderSet, HeaderRecord,
};
pub use request::{Body, RequestOptions, ResponseKind, TransportRequest};
pub use response::{Exchange, ResponseBody, TransportResponse};
pub use transport::{FaultKind, Transport, TransportFault};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("cool-http/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}
