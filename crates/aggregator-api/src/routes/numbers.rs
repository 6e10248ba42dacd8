//! 숫자 윈도우 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /numbers/{type}` - `type ∈ {p, f, e, r}` 숫자를 가져와 윈도우에 병합

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::services::WindowReport;
use crate::state::NumbersState;

/// 숫자 조회 및 윈도우 갱신.
///
/// GET /numbers/{type}
///
/// 응답: `{ windowPrevState, windowCurrState, numbers, avg }`
pub async fn get_numbers(
    State(state): State<Arc<NumbersState>>,
    Path(number_type): Path<String>,
) -> ApiResult<Json<WindowReport>> {
    let report = state.tracker.classify_and_fetch(&number_type).await?;
    Ok(Json(report))
}

/// 숫자 윈도우 라우터 생성.
pub fn numbers_router() -> Router<Arc<NumbersState>> {
    Router::new().route("/{number_type}", get(get_numbers))
}
