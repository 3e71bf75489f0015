use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use common::types::RiskAssessment;
use common::validation::parse_reading;
use crate::app::SharedScorer;
use crate::error::ApiError;

/// POST /predict - 校验请求体后评分
///
/// 校验失败直接返回422，不会进入评分逻辑。
pub async fn predict(
    State(scorer): State<SharedScorer>,
    body: Bytes,
) -> Result<Json<RiskAssessment>, ApiError> {
    let reading = parse_reading(&body)?;
    debug!("Received reading: {}", reading);

    Ok(Json(scorer.score(&reading)))
}
