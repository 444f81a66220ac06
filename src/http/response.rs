// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport responses, captured exchanges and decoded response values

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::request::ResponseKind;
use super::transport::TransportFault;
use crate::error::Result;

/// Response as produced by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code
    pub status: StatusCode,
    /// Reason phrase
    pub status_text: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response with the canonical reason phrase
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body: body.into(),
        }
    }

    /// Check if status is success (2xx)
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// What the dispatch step captured: a response or a transport fault.
///
/// Response interceptors observe both.
#[derive(Debug, Clone)]
pub enum Exchange {
    Response(TransportResponse),
    Fault(TransportFault),
}

impl Exchange {
    /// Whether the exchange counts as a success
    pub fn ok(&self) -> bool {
        match self {
            Exchange::Response(response) => response.ok(),
            Exchange::Fault(_) => false,
        }
    }

    /// Status code, 0 for faults
    pub fn status(&self) -> u16 {
        match self {
            Exchange::Response(response) => response.status.as_u16(),
            Exchange::Fault(_) => 0,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            Exchange::Response(response) => &response.status_text,
            Exchange::Fault(_) => "",
        }
    }

    /// Body as text; the fault message for faults
    pub fn body_text(&self) -> String {
        match self {
            Exchange::Response(response) => response.text_lossy(),
            Exchange::Fault(fault) => fault.to_string(),
        }
    }

    pub fn response(&self) -> Option<&TransportResponse> {
        match self {
            Exchange::Response(response) => Some(response),
            Exchange::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&TransportFault> {
        match self {
            Exchange::Fault(fault) => Some(fault),
            Exchange::Response(_) => None,
        }
    }
}

impl From<std::result::Result<TransportResponse, TransportFault>> for Exchange {
    fn from(result: std::result::Result<TransportResponse, TransportFault>) -> Self {
        match result {
            Ok(response) => Exchange::Response(response),
            Err(fault) => Exchange::Fault(fault),
        }
    }
}

/// Value delivered to the caller for a successful call
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
    Bytes(Bytes),
}

impl ResponseBody {
    /// Decode a body according to the caller's shape hint.
    ///
    /// `Auto` prefers JSON and falls back to text when parsing fails.
    pub fn decode(body: &Bytes, kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Auto => match serde_json::from_slice(body) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => {
                    tracing::trace!(error = %e, "Body is not JSON, returning text");
                    ResponseBody::Text(String::from_utf8_lossy(body).into_owned())
                }
            },
            ResponseKind::Text => ResponseBody::Text(String::from_utf8_lossy(body).into_owned()),
            ResponseKind::Bytes => ResponseBody::Bytes(body.clone()),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Deserialize a JSON body into `T`
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => serde_json::from_str(&text)?,
            ResponseBody::Bytes(bytes) => serde_json::from_slice(&bytes)?,
        };
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => f.write_str(text),
            ResponseBody::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::FaultKind;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_decode_prefers_json() {
        let body = Bytes::from_static(b"{\"id\":1}");
        assert_eq!(
            ResponseBody::decode(&body, ResponseKind::Auto),
            ResponseBody::Json(json!({"id": 1}))
        );
    }

    #[test]
    fn test_decode_falls_back_to_text() {
        let body = Bytes::from_static(b"plain");
        assert_eq!(
            ResponseBody::decode(&body, ResponseKind::Auto),
            ResponseBody::Text("plain".to_string())
        );
        assert_eq!(
            ResponseBody::decode(&Bytes::new(), ResponseKind::Auto),
            ResponseBody::Text(String::new())
        );
    }

    #[test]
    fn test_decode_hints() {
        let body = Bytes::from_static(b"{\"id\":1}");
        assert_eq!(
            ResponseBody::decode(&body, ResponseKind::Text).as_text(),
            Some("{\"id\":1}")
        );
        assert_eq!(
            ResponseBody::decode(&body, ResponseKind::Bytes).as_bytes(),
            Some(&body)
        );
    }

    #[test]
    fn test_into_json() {
        #[derive(Deserialize)]
        struct User {
            id: u32,
        }

        let user: User = ResponseBody::Json(json!({"id": 5})).into_json().unwrap();
        assert_eq!(user.id, 5);
        assert!(ResponseBody::Text("nope".into()).into_json::<User>().is_err());
    }

    #[test]
    fn test_exchange_classification() {
        let ok = Exchange::Response(TransportResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            "x",
        ));
        assert!(ok.ok());
        assert_eq!(ok.status(), 200);
        assert_eq!(ok.status_text(), "OK");

        let missing = Exchange::Response(TransportResponse::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            "gone",
        ));
        assert!(!missing.ok());
        assert_eq!(missing.body_text(), "gone");

        let fault: Exchange = Err(TransportFault::new(FaultKind::Connect, "refused")).into();
        assert!(!fault.ok());
        assert_eq!(fault.status(), 0);
        assert!(fault.response().is_none());
        assert!(fault.body_text().contains("refused"));
    }
}
