// src/server.rs
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::corpus::{self, Scenario, ScenarioMatch};
use crate::error::VerifyError;
use crate::report::Verifier;
use crate::types::VerificationReport;

pub struct Engine {
    pub verifier: Verifier,
    pub default_domain: String,
    pub similarity_threshold: f64,
    pub batch_concurrency: usize,
}

#[derive(Deserialize)]
pub struct VerifyReq {
    #[serde(default)]
    explanation: String,
    domain: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResp {
    #[serde(flatten)]
    report: VerificationReport,
    similar_scenarios: Vec<ScenarioMatch>,
}

#[derive(Deserialize)]
pub struct BatchReq {
    explanations: Vec<String>,
    domain: Option<String>,
}

#[derive(Serialize)]
pub struct BatchResp { reports: Vec<VerificationReport> }

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<VerifyError> for ApiError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::EmptyInput => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => {
                error!(error = %m, "verification failed");
                (StatusCode::INTERNAL_SERVER_ERROR, m)
            }
        };
        (code, Json(json!({ "error": msg }))).into_response()
    }
}

pub async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "ExplainCheck API - Agriculture Track",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/verify": "POST - Verify AI explanations",
            "/api/verify/batch": "POST - Verify several explanations",
            "/api/examples": "GET - Get demo examples",
            "/api/examples/random": "GET - Get one random demo example",
        }
    }))
}

pub async fn health() -> StatusCode { StatusCode::OK }

pub async fn verify(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<VerifyReq>,
) -> Result<Json<VerifyResp>, ApiError> {
    let domain = req.domain.unwrap_or_else(|| engine.default_domain.clone());
    let worker = engine.clone();
    let resp = tokio::task::spawn_blocking(move || -> Result<VerifyResp, VerifyError> {
        let report = worker.verifier.verify(&req.explanation, &domain)?;
        let similar_scenarios = corpus::find_similar(&req.explanation, worker.similarity_threshold);
        Ok(VerifyResp { report, similar_scenarios })
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(resp))
}

pub async fn verify_batch(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<BatchReq>,
) -> Result<Json<BatchResp>, ApiError> {
    let domain = req.domain.unwrap_or_else(|| engine.default_domain.clone());
    let tasks = req.explanations.into_iter().map(|text| {
        let engine = engine.clone();
        let domain = domain.clone();
        tokio::task::spawn_blocking(move || engine.verifier.verify(&text, &domain))
    });

    // order is preserved; the first failure fails the whole batch
    let results = stream::iter(tasks).buffered(engine.batch_concurrency.max(1)).collect::<Vec<_>>().await;
    let mut reports = Vec::with_capacity(results.len());
    for r in results {
        let report = r.map_err(|e| ApiError::Internal(e.to_string()))??;
        reports.push(report);
    }
    Ok(Json(BatchResp { reports }))
}

pub async fn examples() -> Json<&'static [Scenario]> {
    Json(corpus::scenarios())
}

pub async fn random_example() -> Result<Json<&'static Scenario>, ApiError> {
    corpus::random_scenario()
        .map(Json)
        .ok_or_else(|| ApiError::Internal("scenario corpus is empty".into()))
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/verify", post(verify))
        .route("/api/verify/batch", post(verify_batch))
        .route("/api/examples", get(examples))
        .route("/api/examples/random", get(random_example))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

pub async fn run_server(engine: Engine, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
