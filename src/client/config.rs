// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Orchestrator configuration state

use crate::http::{CookieForwardRule, GlobalHeaderSet, HeaderRecord};

/// Per-instance configuration shared by every call
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// URL prefix, always ending in `/`
    pub base_url: Option<String>,
    /// Ask the transport to send credentials with every call
    pub with_credentials: bool,
    /// Headers attached to every call
    pub global_headers: GlobalHeaderSet,
    /// Cookies copied into custom headers, in application order
    pub cookie_forward_rules: Vec<CookieForwardRule>,
}

impl ClientConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.set_base_url(url.as_ref());
        self
    }

    /// Send credentials with every call
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    /// Register a global header
    pub fn global_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_headers.register(HeaderRecord::new(key, value));
        self
    }

    /// Forward a cookie value in a custom header
    pub fn forward_cookie(
        mut self,
        cookie_name: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        self.cookie_forward_rules
            .push(CookieForwardRule::new(cookie_name, header_name));
        self
    }

    /// Store `url` as the base URL, appending a trailing `/` when missing.
    ///
    /// An empty string clears the base URL.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = normalize_base_url(url);
    }

    /// Prefix `url` with the base URL, if one is set
    pub fn resolve_url(&self, url: &str) -> String {
        match self.base_url {
            Some(ref base) => format!("{}{}", base, url),
            None => url.to_string(),
        }
    }
}

fn normalize_base_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let mut base = url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Some(base)
}
