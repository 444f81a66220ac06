// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request orchestrator
//!
//! [`HttpOrchestrator`] wraps a [`Transport`] with base URL resolution,
//! global headers, cookie forwarding and request/response interceptors.
//! Every verb has a single-result form (`get`) and a stream form
//! (`get_stream`); both run the same pipeline.
//!
//! Configuration is read by each call when it assembles headers. Changing it
//! while calls are in flight is allowed but concurrent calls may observe the
//! change inconsistently.

mod config;
mod pipeline;
mod stream;
#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Method;

pub use config::ClientConfig;
pub use stream::ResponseStream;

use self::pipeline::Pipeline;
use crate::error::Result;
use crate::http::{
    Body, CookieForwardRule, CookieReader, CookieSource, HeaderRecord, NoCookies, RequestOptions,
    ResponseBody, Transport,
};
use crate::network::{InterceptorRegistry, RequestInterceptor, ResponseInterceptor};

/// HTTP orchestrator
///
/// Cheap to clone; clones share configuration, cookie cache and interceptors.
///
/// Every call resolves to exactly one of: `Ok(Some(value))`, `Ok(None)` when
/// an interceptor vetoed, or `Err(Error::Http(_))`.
#[derive(Clone)]
pub struct HttpOrchestrator {
    pipeline: Pipeline,
}

impl HttpOrchestrator {
    /// Create an orchestrator with empty configuration and no cookies
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Create an orchestrator with initial configuration
    pub fn with_config(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self {
            pipeline: Pipeline {
                transport,
                config: Arc::new(RwLock::new(config)),
                cookies: Arc::new(CookieReader::new(Arc::new(NoCookies))),
                interceptors: Arc::new(InterceptorRegistry::new()),
            },
        }
    }

    /// Read cookies for forwarding rules from `source`
    pub fn with_cookie_source(mut self, source: Arc<dyn CookieSource>) -> Self {
        self.pipeline.cookies = Arc::new(CookieReader::new(source));
        self
    }

    /// Get a copy of the current configuration
    pub fn config(&self) -> ClientConfig {
        self.pipeline.config.read().clone()
    }

    /// Cookie reader used for forwarding rules
    pub fn cookie_reader(&self) -> &CookieReader {
        &self.pipeline.cookies
    }

    // Configuration

    /// Prefix every call's URL with `url` (a trailing `/` is added if missing)
    pub fn register_base_url(&self, url: &str) {
        self.pipeline.config.write().set_base_url(url);
    }

    pub fn deregister_base_url(&self) {
        self.pipeline.config.write().base_url = None;
    }

    pub fn base_url(&self) -> Option<String> {
        self.pipeline.config.read().base_url.clone()
    }

    pub fn set_with_credentials(&self, with_credentials: bool) {
        self.pipeline.config.write().with_credentials = with_credentials;
    }

    // Global headers

    /// Attach `header` to every call, replacing a header with the same key
    pub fn register_global_header(&self, header: HeaderRecord) {
        tracing::debug!(key = %header.key, "Registering global header");
        self.pipeline.config.write().global_headers.register(header);
    }

    pub fn deregister_global_header(&self, key: &str) -> bool {
        self.pipeline.config.write().global_headers.deregister(key)
    }

    pub fn remove_all_global_headers(&self) {
        self.pipeline.config.write().global_headers.clear_all();
    }

    pub fn global_headers(&self) -> Vec<HeaderRecord> {
        self.pipeline
            .config
            .read()
            .global_headers
            .iter()
            .cloned()
            .collect()
    }

    // Cookie forwarding

    /// Send the value of cookie `cookie_name` in header `header_name` on every
    /// call where the cookie is present
    pub fn send_cookie_value_in_custom_header(
        &self,
        cookie_name: impl Into<String>,
        header_name: impl Into<String>,
    ) {
        self.pipeline
            .config
            .write()
            .cookie_forward_rules
            .push(CookieForwardRule::new(cookie_name, header_name));
    }

    // Interceptors

    pub fn register_request_interceptor(&self, interceptor: Arc<dyn RequestInterceptor>) {
        self.pipeline.interceptors.request.register(interceptor);
    }

    pub fn deregister_request_interceptor(&self, interceptor: &Arc<dyn RequestInterceptor>) -> bool {
        self.pipeline.interceptors.request.deregister(interceptor)
    }

    pub fn register_response_interceptor(&self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.pipeline.interceptors.response.register(interceptor);
    }

    pub fn deregister_response_interceptor(
        &self,
        interceptor: &Arc<dyn ResponseInterceptor>,
    ) -> bool {
        self.pipeline.interceptors.response.deregister(interceptor)
    }

    // Single-result calls

    /// Execute a call with an arbitrary method
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Option<ResponseBody>> {
        self.pipeline.run(method, url, body, options).await
    }

    /// Execute a GET request
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<Option<ResponseBody>> {
        self.request(Method::GET, url, None, options).await
    }

    /// Execute a POST request
    pub async fn post(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Option<ResponseBody>> {
        self.request(Method::POST, url, body, options).await
    }

    /// Execute a PUT request
    pub async fn put(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Option<ResponseBody>> {
        self.request(Method::PUT, url, body, options).await
    }

    /// Execute a PATCH request
    pub async fn patch(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Option<ResponseBody>> {
        self.request(Method::PATCH, url, body, options).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<Option<ResponseBody>> {
        self.request(Method::DELETE, url, None, options).await
    }

    /// Execute a HEAD request
    pub async fn head(&self, url: &str, options: RequestOptions) -> Result<Option<ResponseBody>> {
        self.request(Method::HEAD, url, None, options).await
    }

    // Stream calls

    /// Stream form of [`request`](Self::request)
    pub fn request_stream(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> ResponseStream {
        self.pipeline.run_stream(method, url, body, options)
    }

    pub fn get_stream(&self, url: &str, options: RequestOptions) -> ResponseStream {
        self.request_stream(Method::GET, url, None, options)
    }

    pub fn post_stream(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> ResponseStream {
        self.request_stream(Method::POST, url, body, options)
    }

    pub fn put_stream(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> ResponseStream {
        self.request_stream(Method::PUT, url, body, options)
    }

    pub fn patch_stream(
        &self,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> ResponseStream {
        self.request_stream(Method::PATCH, url, body, options)
    }

    pub fn delete_stream(&self, url: &str, options: RequestOptions) -> ResponseStream {
        self.request_stream(Method::DELETE, url, None, options)
    }

    pub fn head_stream(&self, url: &str, options: RequestOptions) -> ResponseStream {
        self.request_stream(Method::HEAD, url, None, options)
    }
}

impl std::fmt::Debug for HttpOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOrchestrator")
            .field("config", &*self.pipeline.config.read())
            .field("interceptors", &self.pipeline.interceptors)
            .finish()
    }
}
