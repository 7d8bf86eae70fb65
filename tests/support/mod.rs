use axum::body::Body;
use axum::http::{header, Request, Response};
use explaincheck::server::{router, Engine};
use explaincheck::{Midpoint, Policy, Verifier};
use std::sync::Arc;

pub fn app() -> axum::Router {
    app_with(Policy::Enhanced)
}

pub fn app_with(policy: Policy) -> axum::Router {
    let engine = Engine {
        verifier: Verifier::new(policy, Arc::new(Midpoint)).unwrap(),
        default_domain: "agriculture".into(),
        similarity_threshold: 0.6,
        batch_concurrency: 4,
    };
    router(Arc::new(engine))
}

pub fn post_json(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
