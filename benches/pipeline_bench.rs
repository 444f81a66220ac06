// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reqwest::header::{HeaderMap, HeaderValue};

use cool_http::http::{from_records, to_records};
use cool_http::CookieReader;

fn cookie_parsing_benchmark(c: &mut Criterion) {
    let raw = "session=abc123; XSRF-TOKEN=d41d8cd98f00b204; theme=dark; lang=en-US; \
               prefs=%7B%22a%22%3A1%7D; tracking=off";

    c.bench_function("parse_cookie_string", |b| {
        b.iter(|| black_box(CookieReader::parse(black_box(raw))))
    });
}

fn header_projection_benchmark(c: &mut Criterion) {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("authorization", HeaderValue::from_static("Bearer token"));
    headers.insert("x-tenant", HeaderValue::from_static("acme"));
    headers.append("x-trace", HeaderValue::from_static("1"));
    headers.append("x-trace", HeaderValue::from_static("2"));

    c.bench_function("header_round_trip", |b| {
        b.iter(|| {
            let records = to_records(black_box(&headers));
            black_box(from_records(&records))
        })
    });
}

criterion_group!(benches, cookie_parsing_benchmark, header_projection_benchmark);
criterion_main!(benches);
