use std::sync::Arc;
use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use common::config::CorsConfig;
use risk_scorer::Scorer;
use crate::routes;

/// 所有handler共享的评分器，无可变状态
pub type SharedScorer = Arc<dyn Scorer>;

/// 注册路由，评分器作为显式依赖传入
pub fn build_router(scorer: SharedScorer, cors: &CorsConfig) -> Result<Router> {
    let router = Router::new()
        .route("/", get(routes::status).fallback(method_not_allowed))
        .route("/predict", post(routes::predict).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(scorer)
        .layer(cors_layer(cors)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "detail": "Method Not Allowed" })),
    )
}
