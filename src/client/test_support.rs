// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test doubles for the orchestrator

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::http::{
    Body, Exchange, HeaderRecord, Transport, TransportFault, TransportRequest, TransportResponse,
};
use crate::network::{InterceptAction, RequestInterceptor, ResponseInterceptor};

/// Transport returning a fixed reply and recording every request
pub(crate) struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    reply: std::result::Result<TransportResponse, TransportFault>,
}

impl MockTransport {
    pub fn replying(status: u16, body: &'static str) -> Arc<Self> {
        let status = StatusCode::from_u16(status).expect("valid status");
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(TransportResponse::new(status, HeaderMap::new(), body)),
        })
    }

    pub fn failing(fault: TransportFault) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(fault),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last(&self) -> TransportRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("transport was called")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFault> {
        self.requests.lock().push(request);
        self.reply.clone()
    }
}

/// Interceptor that appends its name to a shared log
pub(crate) struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    action: InterceptAction,
}

impl Recorder {
    pub fn passing(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: Arc::clone(log),
            action: InterceptAction::Continue,
        })
    }

    pub fn vetoing(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: Arc::clone(log),
            action: InterceptAction::Veto,
        })
    }
}

#[async_trait]
impl RequestInterceptor for Recorder {
    async fn before_request(
        &self,
        _url: &str,
        _method: &Method,
        _body: Option<&Body>,
        _headers: &mut Vec<HeaderRecord>,
    ) -> InterceptAction {
        self.log.lock().push(self.name);
        self.action
    }
}

#[async_trait]
impl ResponseInterceptor for Recorder {
    async fn after_response(
        &self,
        _exchange: &Exchange,
        _url: &str,
        _method: &Method,
        _body: Option<&Body>,
        _headers: &[HeaderRecord],
    ) -> InterceptAction {
        self.log.lock().push(self.name);
        self.action
    }
}
