// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/Response interceptor traits
//!
//! Interceptors run around every call made through the orchestrator. Either
//! side may veto: a vetoed call completes with no value and no error.

use async_trait::async_trait;
use reqwest::Method;

use crate::http::{Body, Exchange, HeaderRecord};

/// Request interceptor trait
///
/// Runs after headers are assembled and before the transport is invoked.
/// Header records may be changed, added or removed; the result is written
/// back to the outgoing request.
///
/// # Example
///
/// ```rust,no_run
/// use cool_http::network::{RequestInterceptor, InterceptAction};
/// use cool_http::http::{Body, HeaderRecord};
/// use async_trait::async_trait;
/// use reqwest::Method;
///
/// struct TenantInjector {
///     tenant: String,
/// }
///
/// #[async_trait]
/// impl RequestInterceptor for TenantInjector {
///     async fn before_request(
///         &self,
///         _url: &str,
///         _method: &Method,
///         _body: Option<&Body>,
///         headers: &mut Vec<HeaderRecord>,
///     ) -> InterceptAction {
///         headers.push(HeaderRecord::new("x-tenant", self.tenant.clone()));
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn before_request(
        &self,
        url: &str,
        method: &Method,
        body: Option<&Body>,
        headers: &mut Vec<HeaderRecord>,
    ) -> InterceptAction;
}

/// Response interceptor trait
///
/// Observes the captured exchange, including transport faults, before the
/// outcome is classified.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn after_response(
        &self,
        exchange: &Exchange,
        url: &str,
        method: &Method,
        body: Option<&Body>,
        headers: &[HeaderRecord],
    ) -> InterceptAction;
}

/// Action to take after interception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) call
    #[default]
    Continue,
    /// Stop here and deliver nothing to the caller
    Veto,
}

impl InterceptAction {
    pub fn is_veto(self) -> bool {
        self == InterceptAction::Veto
    }
}

impl From<bool> for InterceptAction {
    /// `true` vetoes
    fn from(veto: bool) -> Self {
        if veto {
            InterceptAction::Veto
        } else {
            InterceptAction::Continue
        }
    }
}

/// Auth header injector - common interceptor
#[derive(Debug, Clone, Default)]
pub struct AuthHeaderInjector {
    /// Headers to inject into every request
    headers: Vec<HeaderRecord>,
    /// Host substrings to inject into (empty = all)
    domains: Vec<String>,
}

impl AuthHeaderInjector {
    /// Create a new auth header injector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.headers.push(HeaderRecord::new(
            "authorization",
            format!("Bearer {}", token.into()),
        ));
        self
    }

    /// Add basic auth
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username, password),
        );
        self.headers
            .push(HeaderRecord::new("authorization", format!("Basic {}", encoded)));
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderRecord::new(name, value));
        self
    }

    /// Restrict to specific domains
    pub fn for_domains(mut self, domains: Vec<String>) -> Self {
        self.domains = domains;
        self
    }

    fn applies_to(&self, url: &str) -> bool {
        if self.domains.is_empty() {
            return true;
        }

        url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|host| self.domains.iter().any(|d| host.contains(d.as_str()))))
            .unwrap_or(false)
    }
}

#[async_trait]
impl RequestInterceptor for AuthHeaderInjector {
    async fn before_request(
        &self,
        url: &str,
        _method: &Method,
        _body: Option<&Body>,
        headers: &mut Vec<HeaderRecord>,
    ) -> InterceptAction {
        if !self.applies_to(url) {
            return InterceptAction::Continue;
        }

        for header in &self.headers {
            headers.retain(|h| !h.key.eq_ignore_ascii_case(&header.key));
        }
        headers.extend(self.headers.iter().cloned());

        InterceptAction::Continue
    }
}

/// Request logger interceptor
///
/// Register it on both chains to log requests and responses. Never vetoes.
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Log request bodies
    pub log_bodies: bool,
    /// Log response bodies
    pub log_responses: bool,
    /// Filter by URL pattern
    pub url_filter: Option<String>,
}

impl RequestLogger {
    fn should_log(&self, url: &str) -> bool {
        self.url_filter
            .as_ref()
            .map_or(true, |filter| url.contains(filter.as_str()))
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn before_request(
        &self,
        url: &str,
        method: &Method,
        body: Option<&Body>,
        headers: &mut Vec<HeaderRecord>,
    ) -> InterceptAction {
        if !self.should_log(url) {
            return InterceptAction::Continue;
        }

        tracing::info!(%method, url, headers = headers.len(), "Request");

        if self.log_bodies {
            if let Some(body) = body {
                tracing::debug!(body = ?body, "Request body");
            }
        }

        InterceptAction::Continue
    }
}

#[async_trait]
impl ResponseInterceptor for RequestLogger {
    async fn after_response(
        &self,
        exchange: &Exchange,
        url: &str,
        method: &Method,
        _body: Option<&Body>,
        _headers: &[HeaderRecord],
    ) -> InterceptAction {
        if !self.should_log(url) {
            return InterceptAction::Continue;
        }

        match exchange {
            Exchange::Response(response) => {
                tracing::info!(%method, url, status = %response.status, "Response");
                if self.log_responses {
                    tracing::debug!(body = %response.text_lossy(), "Response body");
                }
            }
            Exchange::Fault(fault) => {
                tracing::warn!(%method, url, error = %fault, "Transport fault");
            }
        }

        InterceptAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FaultKind, TransportFault};

    #[test]
    fn test_intercept_action_from_bool() {
        assert!(InterceptAction::from(true).is_veto());
        assert!(!InterceptAction::from(false).is_veto());
        assert_eq!(InterceptAction::default(), InterceptAction::Continue);
    }

    #[tokio::test]
    async fn test_auth_injector_replaces_existing() {
        let injector = AuthHeaderInjector::new()
            .bearer_token("test_token")
            .header("x-custom", "value");

        let mut headers = vec![HeaderRecord::new("Authorization", "old")];
        let action = injector
            .before_request("https://api.example.com/x", &Method::GET, None, &mut headers)
            .await;

        assert_eq!(action, InterceptAction::Continue);
        assert_eq!(
            headers,
            vec![
                HeaderRecord::new("authorization", "Bearer test_token"),
                HeaderRecord::new("x-custom", "value"),
            ]
        );
    }

    #[test]
    fn test_auth_injector_domain_filter() {
        let injector = AuthHeaderInjector::new()
            .basic_auth("user", "pass")
            .for_domains(vec!["example.com".to_string()]);

        let mut headers = Vec::new();
        tokio_test::block_on(injector.before_request(
            "https://other.org/",
            &Method::GET,
            None,
            &mut headers,
        ));
        assert!(headers.is_empty());

        tokio_test::block_on(injector.before_request(
            "https://api.example.com/",
            &Method::GET,
            None,
            &mut headers,
        ));
        assert_eq!(headers[0].value, "Basic dXNlcjpwYXNz");
    }

    #[tokio::test]
    async fn test_request_logger_never_vetoes() {
        let logger = RequestLogger {
            log_bodies: true,
            log_responses: true,
            url_filter: None,
        };
        let body = Body::from("payload");
        let mut headers = Vec::new();

        let action = logger
            .before_request("https://x.test", &Method::POST, Some(&body), &mut headers)
            .await;
        assert!(!action.is_veto());

        let fault = Exchange::Fault(TransportFault::new(FaultKind::Timeout, "slow"));
        let action = logger
            .after_response(&fault, "https://x.test", &Method::POST, Some(&body), &headers)
            .await;
        assert!(!action.is_veto());
    }
}
