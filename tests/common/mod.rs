#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use talentflow_backend::{
    app,
    config::Config,
    database::{memory::MemoryStore, seed::seed_if_empty, store::Store},
    services::network_service::{AlwaysFail, NetworkSimulator},
    AppState,
};
use tower::ServiceExt;

pub struct TestApp {
    pub store: Arc<dyn Store>,
    pub router: Router,
}

fn build(store: Arc<dyn Store>, network: NetworkSimulator) -> TestApp {
    let state = AppState::with_network(store.clone(), network, &Config::default());
    TestApp {
        store,
        router: app(state, None),
    }
}

/// Zero latency, writes never fail, empty store.
pub fn empty_app() -> TestApp {
    build(Arc::new(MemoryStore::new()), NetworkSimulator::instant())
}

/// Zero latency, writes never fail, demo data loaded.
pub async fn seeded_app() -> TestApp {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed_if_empty(store.as_ref(), &Config::default().share_base_url)
        .await
        .expect("seed");
    build(store, NetworkSimulator::instant())
}

/// Shares a store with another app but fails every write.
pub fn failing_app(store: Arc<dyn Store>) -> TestApp {
    build(store, NetworkSimulator::with_policy(Arc::new(AlwaysFail)))
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), 10 * 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, JsonValue) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request("PATCH", uri, Some(body)).await
    }
}
