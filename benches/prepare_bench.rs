// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fetch_request::{
    FetchClient, Origin, RequestConfig, RequestDescriptor, RequestMethod, Response, Result,
    Transport,
};
use serde_json::json;
use url::Url;

struct NoopTransport;

#[async_trait]
impl Transport for NoopTransport {
    async fn fetch(&self, _url: &Url, _descriptor: &RequestDescriptor) -> Result<Response> {
        Err(fetch_request::Error::transport("not dispatched in benchmarks"))
    }
}

fn prepare_benchmark(c: &mut Criterion) {
    let client = FetchClient::with_transport(
        Origin::parse("https://app.example/dashboard").unwrap(),
        NoopTransport,
    );
    let config = RequestConfig::new()
        .header("Authorization", "Bearer token")
        .header("Content-Type", "application/json");
    let payload = json!({
        "name": "widget",
        "tags": ["a", "b", "c"],
        "dimensions": {"w": 10, "h": 20}
    });

    c.bench_function("prepare_get_same_origin", |b| {
        b.iter(|| {
            black_box(
                client
                    .prepare("/api/items?page=2", RequestMethod::Get, None, None)
                    .unwrap(),
            )
        })
    });

    c.bench_function("prepare_post_cross_origin", |b| {
        b.iter(|| {
            black_box(
                client
                    .prepare(
                        "https://other.example/api/items",
                        RequestMethod::Post,
                        Some(payload.clone().into()),
                        Some(&config),
                    )
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, prepare_benchmark);
criterion_main!(benches);
