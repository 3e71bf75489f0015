use axum::Json;
use serde::{Deserialize, Serialize};

/// 存活检查返回的固定状态
pub const SERVICE_STATUS: &str = "NeuroWatch Backend Running";

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// GET / - 存活检查，不依赖任何状态
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: SERVICE_STATUS.to_string(),
    })
}
