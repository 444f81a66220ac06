// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered interceptor chains

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Method;

use super::interceptor_trait::{InterceptAction, RequestInterceptor, ResponseInterceptor};
use crate::http::{Body, Exchange, HeaderRecord};

/// Interceptor chain - registration order is invocation order
pub struct InterceptorChain<T: ?Sized> {
    interceptors: RwLock<Vec<Arc<T>>>,
}

impl<T: ?Sized> Default for InterceptorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> InterceptorChain<T> {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self {
            interceptors: RwLock::new(Vec::new()),
        }
    }

    /// Append an interceptor
    pub fn register(&self, interceptor: Arc<T>) {
        self.interceptors.write().push(interceptor);
    }

    /// Remove the first occurrence of `interceptor` (by identity).
    ///
    /// Returns false when it was never registered.
    pub fn deregister(&self, interceptor: &Arc<T>) -> bool {
        let mut interceptors = self.interceptors.write();
        let target = Arc::as_ptr(interceptor).cast::<()>();

        match interceptors
            .iter()
            .position(|i| Arc::as_ptr(i).cast::<()>() == target)
        {
            Some(index) => {
                interceptors.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clone the current chain so it can be walked without holding the lock
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.interceptors.read().clone()
    }

    pub fn len(&self) -> usize {
        self.interceptors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.read().is_empty()
    }
}

impl<T: ?Sized> std::fmt::Debug for InterceptorChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.len())
            .finish()
    }
}

impl InterceptorChain<dyn RequestInterceptor> {
    /// Run every request interceptor in order, stopping at the first veto
    pub async fn process_request(
        &self,
        url: &str,
        method: &Method,
        body: Option<&Body>,
        headers: &mut Vec<HeaderRecord>,
    ) -> InterceptAction {
        for (index, interceptor) in self.snapshot().into_iter().enumerate() {
            if interceptor
                .before_request(url, method, body, headers)
                .await
                .is_veto()
            {
                tracing::debug!(index, %method, url, "Request vetoed by interceptor");
                return InterceptAction::Veto;
            }
        }
        InterceptAction::Continue
    }
}

impl InterceptorChain<dyn ResponseInterceptor> {
    /// Run every response interceptor in order, stopping at the first veto
    pub async fn process_response(
        &self,
        exchange: &Exchange,
        url: &str,
        method: &Method,
        body: Option<&Body>,
        headers: &[HeaderRecord],
    ) -> InterceptAction {
        for (index, interceptor) in self.snapshot().into_iter().enumerate() {
            if interceptor
                .after_response(exchange, url, method, body, headers)
                .await
                .is_veto()
            {
                tracing::debug!(index, %method, url, "Response vetoed by interceptor");
                return InterceptAction::Veto;
            }
        }
        InterceptAction::Continue
    }
}

/// Request and response chains owned by one orchestrator
#[derive(Debug, Default)]
pub struct InterceptorRegistry {
    pub request: InterceptorChain<dyn RequestInterceptor>,
    pub response: InterceptorChain<dyn ResponseInterceptor>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::Recorder;
    use parking_lot::Mutex;

    #[tokio::test]
    async fn test_registration_order_is_invocation_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: InterceptorChain<dyn RequestInterceptor> = InterceptorChain::new();
        chain.register(Recorder::passing("i1", &log));
        chain.register(Recorder::passing("i2", &log));

        let mut headers = Vec::new();
        let action = chain
            .process_request("u", &Method::GET, None, &mut headers)
            .await;

        assert_eq!(action, InterceptAction::Continue);
        assert_eq!(*log.lock(), vec!["i1", "i2"]);
    }

    #[tokio::test]
    async fn test_veto_stops_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: InterceptorChain<dyn ResponseInterceptor> = InterceptorChain::new();
        chain.register(Recorder::vetoing("first", &log));
        chain.register(Recorder::passing("second", &log));

        let exchange = Exchange::Fault(crate::http::TransportFault::new(
            crate::http::FaultKind::Connect,
            "down",
        ));
        let action = chain
            .process_response(&exchange, "u", &Method::GET, None, &[])
            .await;

        assert!(action.is_veto());
        assert_eq!(*log.lock(), vec!["first"]);
    }

    #[test]
    fn test_deregister_by_identity() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: InterceptorChain<dyn RequestInterceptor> = InterceptorChain::new();
        let a: Arc<dyn RequestInterceptor> = Recorder::passing("a", &log);
        let b: Arc<dyn RequestInterceptor> = Recorder::passing("b", &log);

        chain.register(Arc::clone(&a));
        assert!(!chain.deregister(&b));
        assert_eq!(chain.len(), 1);

        assert!(chain.deregister(&a));
        assert!(chain.is_empty());
        assert!(!chain.deregister(&a));
    }

    #[test]
    fn test_double_registration_removes_first_only() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain: InterceptorChain<dyn RequestInterceptor> = InterceptorChain::new();
        let a: Arc<dyn RequestInterceptor> = Recorder::passing("a", &log);
        let b: Arc<dyn RequestInterceptor> = Recorder::passing("b", &log);

        chain.register(Arc::clone(&a));
        chain.register(Arc::clone(&b));
        chain.register(Arc::clone(&a));

        assert!(chain.deregister(&a));
        let remaining = chain.snapshot();
        assert_eq!(remaining.len(), 2);
        assert_eq!(
            Arc::as_ptr(&remaining[0]).cast::<()>(),
            Arc::as_ptr(&b).cast::<()>()
        );

        let mut headers = Vec::new();
        tokio_test::block_on(chain.process_request("u", &Method::GET, None, &mut headers));
        assert_eq!(*log.lock(), vec!["b", "a"]);
    }
}
