// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request bodies, per-call options and the request handed to a transport

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured payload, sent as `application/json`
    Json(serde_json::Value),
    /// Plain text payload
    Text(String),
    /// Raw bytes
    Bytes(Bytes),
}

impl Body {
    /// Serialize any value into a JSON body
    pub fn json<T: Serialize>(data: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(data)?))
    }

    /// Encode the body for the wire
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(match self {
            Body::Json(value) => Bytes::from(serde_json::to_vec(value)?),
            Body::Text(text) => Bytes::from(text.clone()),
            Body::Bytes(bytes) => bytes.clone(),
        })
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Body::Json(_))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

/// How the caller wants a successful body returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Parse as JSON, fall back to text when parsing fails
    #[default]
    Auto,
    /// Always return text
    Text,
    /// Always return raw bytes
    Bytes,
}

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Caller-supplied headers, merged before global headers
    pub headers: HeaderMap,
    /// Send credentials (cookies) with the call
    pub with_credentials: bool,
    /// Response shape hint
    pub response_kind: ResponseKind,
    /// Query parameters appended to the resolved URL, in order
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header. Invalid names or values are ignored.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Set credentials mode
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    /// Set the response shape hint
    pub fn response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    /// Append a query parameter. Repeated names are kept.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Fully assembled request handed to a [`Transport`](super::Transport)
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Body>,
    pub options: RequestOptions,
}

impl TransportRequest {
    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.options
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.options
            .headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_builder() {
        let options = RequestOptions::new()
            .header("x-custom", "value")
            .header("x-custom", "second")
            .header("bad name", "ignored")
            .with_credentials(true)
            .response_kind(ResponseKind::Text)
            .query("page", "2")
            .query("tag", "a");

        assert_eq!(options.headers.get_all("x-custom").iter().count(), 2);
        assert_eq!(options.headers.len(), 2);
        assert!(options.with_credentials);
        assert_eq!(options.response_kind, ResponseKind::Text);
        assert_eq!(
            options.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("tag".to_string(), "a".to_string())
            ]
        );
    }

    #[test]
    fn test_body_encoding() {
        #[derive(Serialize)]
        struct User {
            id: u32,
        }

        let body = Body::json(&User { id: 7 }).unwrap();
        assert!(body.is_json());
        assert_eq!(body, Body::Json(json!({"id": 7})));
        assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(b"{\"id\":7}"));
        assert_eq!(Body::from("hi").to_bytes().unwrap(), Bytes::from_static(b"hi"));
    }

    #[test]
    fn test_transport_request_headers() {
        let request = TransportRequest {
            method: Method::GET,
            url: "https://example.com".to_string(),
            body: None,
            options: RequestOptions::new().header("X-A", "1").header("x-a", "2"),
        };
        assert_eq!(request.header("x-a"), Some("1"));
        assert_eq!(request.header_all("X-A"), vec!["1", "2"]);
        assert_eq!(request.header("missing"), None);
    }
}
