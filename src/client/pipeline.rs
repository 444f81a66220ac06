// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call request pipeline
//!
//! Phases run in a fixed order: resolve URL, assemble headers, request
//! interceptors, dispatch, response interceptors, classify. A veto in either
//! interceptor phase ends the call with no value and no error.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::HeaderMap;
use reqwest::Method;

use super::config::ClientConfig;
use crate::error::{HttpError, Result};
use crate::http::{
    append_records, apply_record_changes, to_records, Body, CookieReader, Exchange, HeaderRecord,
    RequestOptions, ResponseBody, ResponseKind, Transport, TransportRequest,
};
use crate::network::{InterceptAction, InterceptorRegistry};

/// State owned by one in-flight call
#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    pub url: String,
    pub method: Method,
    pub body: Option<Body>,
    pub headers: HeaderMap,
    pub with_credentials: bool,
    pub response_kind: ResponseKind,
    pub query: Vec<(String, String)>,
    pub should_short_circuit: bool,
}

impl RequestContext {
    /// Header records as seen by interceptors
    pub fn records(&self) -> Vec<HeaderRecord> {
        to_records(&self.headers)
    }

    fn to_transport_request(&self) -> TransportRequest {
        TransportRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            body: self.body.clone(),
            options: RequestOptions {
                headers: self.headers.clone(),
                with_credentials: self.with_credentials,
                response_kind: self.response_kind,
                query: self.query.clone(),
            },
        }
    }
}

/// Shared pipeline state. Clones share configuration and registries.
#[derive(Clone)]
pub(crate) struct Pipeline {
    pub transport: Arc<dyn Transport>,
    pub config: Arc<RwLock<ClientConfig>>,
    pub cookies: Arc<CookieReader>,
    pub interceptors: Arc<InterceptorRegistry>,
}

impl Pipeline {
    /// Resolve the URL and assemble headers from caller, global and cookie sources
    pub fn prepare(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> RequestContext {
        let config = self.config.read();
        let url = config.resolve_url(url);

        let mut headers = options.headers;
        append_records(&mut headers, config.global_headers.iter());

        for rule in &config.cookie_forward_rules {
            match self.cookies.get_value(&rule.cookie_name) {
                Some(value) if !value.is_empty() => {
                    let record = HeaderRecord::new(rule.target_header_name.clone(), value);
                    append_records(&mut headers, std::iter::once(&record));
                }
                _ => {
                    tracing::trace!(cookie = %rule.cookie_name, "Cookie absent, not forwarded");
                }
            }
        }

        RequestContext {
            url,
            method,
            body,
            headers,
            with_credentials: options.with_credentials || config.with_credentials,
            response_kind: options.response_kind,
            query: options.query,
            should_short_circuit: false,
        }
    }

    /// Run the request chain and write header changes back into the context
    pub async fn intercept_request(&self, ctx: &mut RequestContext) -> InterceptAction {
        let original = ctx.records();
        let mut records = original.clone();

        let action = self
            .interceptors
            .request
            .process_request(&ctx.url, &ctx.method, ctx.body.as_ref(), &mut records)
            .await;

        if action.is_veto() {
            ctx.should_short_circuit = true;
            return action;
        }

        if records != original {
            tracing::trace!(count = records.len(), "Writing back intercepted headers");
            apply_record_changes(&mut ctx.headers, &original, &records);
        }

        InterceptAction::Continue
    }

    /// Invoke the transport once. Faults are captured, never raised.
    pub async fn dispatch(&self, ctx: &RequestContext) -> Exchange {
        tracing::debug!(method = %ctx.method, url = %ctx.url, "Dispatching request");

        let exchange: Exchange = self
            .transport
            .execute(ctx.to_transport_request())
            .await
            .into();

        if let Exchange::Fault(ref fault) = exchange {
            tracing::debug!(method = %ctx.method, url = %ctx.url, error = %fault, "Transport fault captured");
        }

        exchange
    }

    /// Run the whole response chain
    pub async fn intercept_response(
        &self,
        ctx: &mut RequestContext,
        exchange: &Exchange,
    ) -> InterceptAction {
        let action = self
            .interceptors
            .response
            .process_response(
                exchange,
                &ctx.url,
                &ctx.method,
                ctx.body.as_ref(),
                &ctx.records(),
            )
            .await;

        if action.is_veto() {
            ctx.should_short_circuit = true;
        }
        action
    }

    /// Single-result pipeline. `Ok(None)` means an interceptor vetoed.
    pub async fn run(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Option<ResponseBody>> {
        let mut ctx = self.prepare(method, url, body, options);

        self.intercept_request(&mut ctx).await;
        if ctx.should_short_circuit {
            return Ok(None);
        }

        let exchange = self.dispatch(&ctx).await;

        self.intercept_response(&mut ctx, &exchange).await;
        if ctx.should_short_circuit {
            return Ok(None);
        }

        classify(&ctx, exchange).map(Some)
    }
}

/// Turn a delivered exchange into the caller's value or an [`HttpError`]
pub(crate) fn classify(ctx: &RequestContext, exchange: Exchange) -> Result<ResponseBody> {
    match exchange {
        Exchange::Response(ref response) if response.ok() => {
            Ok(ResponseBody::decode(&response.body, ctx.response_kind))
        }
        failed => {
            let err = HttpError {
                method: ctx.method.to_string(),
                url: ctx.url.clone(),
                status: failed.status(),
                status_text: failed.status_text().to_string(),
                body: failed.body_text(),
            };
            tracing::debug!(method = %err.method, url = %err.url, status = err.status, "Call failed");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockTransport;
    use crate::http::{CookieForwardRule, SharedCookieString, TransportResponse};
    use reqwest::StatusCode;

    fn pipeline(transport: Arc<MockTransport>, config: ClientConfig, cookies: &str) -> Pipeline {
        Pipeline {
            transport,
            config: Arc::new(RwLock::new(config)),
            cookies: Arc::new(CookieReader::new(Arc::new(SharedCookieString::new(cookies)))),
            interceptors: Arc::new(InterceptorRegistry::new()),
        }
    }

    #[test]
    fn test_prepare_merges_caller_global_and_cookie_headers() {
        let mut config = ClientConfig::new()
            .base_url("https://api.example.com")
            .global_header("x-global", "g");
        config
            .cookie_forward_rules
            .push(CookieForwardRule::new("a", "X-A"));
        config
            .cookie_forward_rules
            .push(CookieForwardRule::new("missing", "X-Missing"));

        let p = pipeline(MockTransport::replying(200, ""), config, "a=1; b=2");
        let ctx = p.prepare(
            Method::GET,
            "users/1",
            None,
            RequestOptions::new().header("x-caller", "c"),
        );

        assert_eq!(ctx.url, "https://api.example.com/users/1");
        assert_eq!(ctx.headers.get("x-caller").unwrap(), "c");
        assert_eq!(ctx.headers.get("x-global").unwrap(), "g");
        assert_eq!(ctx.headers.get("x-a").unwrap(), "1");
        assert!(!ctx.headers.contains_key("x-missing"));
        assert!(!ctx.with_credentials);
        assert!(!ctx.should_short_circuit);
    }

    #[test]
    fn test_prepare_credentials_from_config_or_options() {
        let p = pipeline(
            MockTransport::replying(200, ""),
            ClientConfig::new().with_credentials(true),
            "",
        );
        assert!(p.prepare(Method::GET, "u", None, RequestOptions::new()).with_credentials);

        let p = pipeline(MockTransport::replying(200, ""), ClientConfig::new(), "");
        let options = RequestOptions::new().with_credentials(true);
        assert!(p.prepare(Method::GET, "u", None, options).with_credentials);
    }

    #[test]
    fn test_empty_cookie_value_not_forwarded() {
        let config = ClientConfig::new().forward_cookie("token", "X-Token");
        let p = pipeline(MockTransport::replying(200, ""), config, "token=; other=1");
        let ctx = p.prepare(Method::GET, "u", None, RequestOptions::new());
        assert!(!ctx.headers.contains_key("x-token"));
    }

    #[test]
    fn test_classify() {
        let p = pipeline(MockTransport::replying(200, ""), ClientConfig::new(), "");
        let ctx = p.prepare(Method::DELETE, "https://a.test/x", None, RequestOptions::new());

        let ok = Exchange::Response(TransportResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            "{\"id\":1}",
        ));
        assert_eq!(
            classify(&ctx, ok).unwrap(),
            ResponseBody::Json(serde_json::json!({"id": 1}))
        );

        let failed = Exchange::Response(TransportResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderMap::new(),
            "boom",
        ));
        let err = classify(&ctx, failed).unwrap_err();
        let http = err.as_http().unwrap();
        assert_eq!(http.method, "DELETE");
        assert_eq!(http.status, 500);
        assert_eq!(http.status_text, "Internal Server Error");
        assert_eq!(http.body, "boom");
    }
}
