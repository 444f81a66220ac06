// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Stream delivery of a call
//!
//! Header assembly, the request chain and dispatch are shared with the
//! single-result path. Each response interceptor becomes its own stage on the
//! stream, so its side effects apply per emitted item.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Method;

use super::pipeline::{classify, Pipeline, RequestContext};
use crate::error::Result;
use crate::http::{Body, Exchange, RequestOptions, ResponseBody};

/// Stream of at most one item: the call's value or its error.
///
/// Vetoed calls end without emitting anything. Nothing is sent until the
/// stream is first polled.
pub type ResponseStream = BoxStream<'static, Result<ResponseBody>>;

impl Pipeline {
    pub fn run_stream(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> ResponseStream {
        let pipeline = self.clone();
        let url = url.to_string();

        let mut staged: BoxStream<'static, (RequestContext, Exchange)> = stream::once(async move {
            let mut ctx = pipeline.prepare(method, &url, body, options);
            pipeline.intercept_request(&mut ctx).await;
            if ctx.should_short_circuit {
                return None;
            }
            let exchange = pipeline.dispatch(&ctx).await;
            Some((ctx, exchange))
        })
        .filter_map(future::ready)
        .boxed();

        for (index, interceptor) in self.interceptors.response.snapshot().into_iter().enumerate() {
            staged = staged
                .filter_map(move |(ctx, exchange)| {
                    let interceptor = Arc::clone(&interceptor);
                    async move {
                        let action = interceptor
                            .after_response(
                                &exchange,
                                &ctx.url,
                                &ctx.method,
                                ctx.body.as_ref(),
                                &ctx.records(),
                            )
                            .await;

                        if action.is_veto() {
                            tracing::debug!(index, method = %ctx.method, url = %ctx.url, "Response vetoed by interceptor");
                            return None;
                        }
                        Some((ctx, exchange))
                    }
                })
                .boxed();
        }

        staged
            .map(|(ctx, exchange)| classify(&ctx, exchange))
            .boxed()
    }
}
