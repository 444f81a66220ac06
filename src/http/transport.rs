// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport capability the orchestrator dispatches through

use async_trait::async_trait;
use thiserror::Error;

use super::request::TransportRequest;
use super::response::TransportResponse;

/// Sends one assembled request and returns the response or a fault.
///
/// Timeouts and cancellation belong to the implementation and surface as
/// [`TransportFault`]s.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFault>;
}

/// Category of transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Connection could not be established
    Connect,
    /// Exchange timed out
    Timeout,
    /// URL could not be parsed
    InvalidUrl,
    /// Request could not be built or sent
    Request,
    /// Response body could not be read
    Body,
}

/// Exchange could not be completed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind:?} fault: {message}")]
pub struct TransportFault {
    pub kind: FaultKind,
    pub message: String,
}

impl TransportFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == FaultKind::Timeout
    }
}

impl From<reqwest::Error> for TransportFault {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            FaultKind::Timeout
        } else if e.is_connect() {
            FaultKind::Connect
        } else if e.is_body() || e.is_decode() {
            FaultKind::Body
        } else {
            FaultKind::Request
        };
        Self::new(kind, e.to_string())
    }
}

impl From<url::ParseError> for TransportFault {
    fn from(e: url::ParseError) -> Self {
        Self::new(FaultKind::InvalidUrl, e.to_string())
    }
}
