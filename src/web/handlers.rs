use std::convert::Infallible;
use std::sync::Arc;

use serde::Deserialize;
use warp::http::StatusCode;
use warp::Reply;

use crate::gcd::GcdResult;
use super::State;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub gcd: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "lodestoneID")]
    pub lodestone_id: String,
}

/// 목표 GCD에 필요한 스킬 스피드와 파생 GCD 표를 계산
///
/// 도달 불가능한 입력도 오류가 아니라 null이 채워진 결과로 내려갑니다.
pub async fn calculate_handler(body: CalculateRequest) -> Result<impl Reply, Infallible> {
    tracing::info!("calculating skill speed for gcd {}", body.gcd);
    let result = GcdResult::calculate(body.gcd);

    Ok(warp::reply::json(&result))
}

/// 로드스톤 ID로 캐릭터 프로필 조회 (캐시 미스 시 수집)
pub async fn search_handler(
    state: Arc<State>,
    body: SearchRequest,
) -> Result<warp::reply::Response, Infallible> {
    match state.cache.resolve(&body.lodestone_id).await {
        Ok(profile) => Ok(warp::reply::json(&profile).into_response()),
        Err(e) => {
            tracing::error!("error resolving character {}: {}", body.lodestone_id, e);
            let message = serde_json::json!({ "message": e.to_string() });
            Ok(warp::reply::with_status(
                warp::reply::json(&message),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response())
        }
    }
}
