// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie string reading and cookie-to-header forwarding rules

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

/// Read-only access to the current raw cookie string (`name=value; name=value`)
pub trait CookieSource: Send + Sync {
    fn raw_cookies(&self) -> String;
}

impl<F> CookieSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn raw_cookies(&self) -> String {
        self()
    }
}

/// Source that never has cookies
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieSource for NoCookies {
    fn raw_cookies(&self) -> String {
        String::new()
    }
}

/// Shared, settable cookie string
///
/// Clones share the same underlying string.
#[derive(Debug, Clone, Default)]
pub struct SharedCookieString {
    raw: Arc<RwLock<String>>,
}

impl SharedCookieString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(RwLock::new(raw.into())),
        }
    }

    /// Replace the raw cookie string
    pub fn set(&self, raw: impl Into<String>) {
        *self.raw.write() = raw.into();
    }
}

impl CookieSource for SharedCookieString {
    fn raw_cookies(&self) -> String {
        self.raw.read().clone()
    }
}

/// Parsed cookie name -> value mapping
pub type CookieMap = HashMap<String, String>;

/// Copy the value of `cookie_name` into the `target_header_name` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieForwardRule {
    pub cookie_name: String,
    pub target_header_name: String,
}

impl CookieForwardRule {
    pub fn new(cookie_name: impl Into<String>, target_header_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            target_header_name: target_header_name.into(),
        }
    }
}

#[derive(Default)]
struct CookieCache {
    /// Raw string the cached map was built from, `None` before the first read
    raw: Option<String>,
    cookies: Arc<CookieMap>,
}

/// Parses the cookie source lazily, re-parsing only when the raw string changes
pub struct CookieReader {
    source: Arc<dyn CookieSource>,
    cache: Mutex<CookieCache>,
}

impl CookieReader {
    pub fn new(source: Arc<dyn CookieSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(CookieCache::default()),
        }
    }

    /// Get the decoded value of a cookie
    pub fn get_value(&self, name: &str) -> Option<String> {
        self.cookies().get(name).cloned()
    }

    /// Get the full mapping for the current raw cookie string.
    ///
    /// Consecutive calls with an unchanged raw string return the same `Arc`.
    pub fn cookies(&self) -> Arc<CookieMap> {
        let current = self.source.raw_cookies();
        let mut cache = self.cache.lock();

        if cache.raw.as_deref() == Some(current.as_str()) {
            tracing::trace!("Cookie cache hit");
            return Arc::clone(&cache.cookies);
        }

        tracing::trace!(len = current.len(), "Cookie cache miss, re-parsing");
        cache.cookies = Arc::new(Self::parse(&current));
        cache.raw = Some(current);
        Arc::clone(&cache.cookies)
    }

    /// Parse a raw cookie string.
    ///
    /// Entries are separated by `"; "` and split at the first `=`. Names and
    /// values are URI-decoded, keeping the raw text when decoding fails.
    /// Entries without `=` or with an empty name are ignored.
    pub fn parse(raw: &str) -> CookieMap {
        let mut cookies = CookieMap::new();

        for entry in raw.split("; ") {
            let Some((name, value)) = entry.split_once('=') else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            cookies.insert(decode_component(name), decode_component(value));
        }

        cookies
    }
}

impl std::fmt::Debug for CookieReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieReader")
            .field("cached", &self.cache.lock().cookies.len())
            .finish()
    }
}

/// Any malformed escape or invalid UTF-8 leaves the whole component raw.
fn decode_component(component: &str) -> String {
    if !has_well_formed_escapes(component) {
        return component.to_string();
    }
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}

fn has_well_formed_escapes(component: &str) -> bool {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
