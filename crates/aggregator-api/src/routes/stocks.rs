//! 주가 통계 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /stocks/{ticker}?minutes=N&aggregation=average` - 평균 가격과 가격 이력
//! - `GET /stockcorrelation?ticker=A&ticker=B&minutes=N` - 두 종목 상관계수
//!   (`ticker=A,B` 형식도 허용)

use aggregator_core::{Minutes, ServiceError, Ticker};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::services::{AverageReport, CorrelationReport};
use crate::state::StocksState;

/// 지원하는 집계 방식.
const AVERAGE_AGGREGATION: &str = "average";

// ==================== 요청 타입 ====================

/// `GET /stocks/{ticker}` 쿼리.
///
/// 검증 메시지를 직접 만들기 위해 모든 값을 문자열로 받습니다.
#[derive(Debug, Default, Deserialize)]
pub struct StockAverageQuery {
    /// 조회 기간(분)
    pub minutes: Option<String>,
    /// 집계 방식 ("average"만 지원)
    pub aggregation: Option<String>,
}

// ==================== 파라미터 해석 ====================

/// 쿼리 값에서 조회 기간을 파싱합니다. 누락도 잘못된 값으로 취급합니다.
fn parse_minutes(raw: Option<&str>, message: &str) -> Result<Minutes, ServiceError> {
    raw.and_then(|m| Minutes::parse(m).ok())
        .ok_or_else(|| ServiceError::InvalidParameters(message.to_string()))
}

/// `ticker` 쿼리 값들에서 정확히 두 개의 서로 다른 티커를 추출합니다.
///
/// 값이 하나면 쉼표로 나눈 쌍(`A,B`)으로 해석하고,
/// 여러 개면 반복된 `ticker` 파라미터로 해석합니다.
pub fn parse_ticker_pair(values: &[String]) -> Result<(Ticker, Ticker), ServiceError> {
    let raw: Vec<&str> = match values {
        [single] => single.split(',').collect(),
        many => many.iter().map(String::as_str).collect(),
    };

    let [first, second] = raw.as_slice() else {
        return Err(ServiceError::InvalidParameters(
            "Exactly two tickers are required".to_string(),
        ));
    };

    let exactly_two = || ServiceError::InvalidParameters("Exactly two tickers are required".to_string());
    let first = Ticker::new(first).map_err(|_| exactly_two())?;
    let second = Ticker::new(second).map_err(|_| exactly_two())?;

    if first == second {
        return Err(ServiceError::InvalidParameters(
            "Exactly two distinct tickers are required".to_string(),
        ));
    }

    Ok((first, second))
}

// ==================== Handler ====================

/// 단일 종목 평균 가격.
///
/// GET /stocks/{ticker}?minutes=N&aggregation=average
pub async fn get_stock_average(
    State(state): State<Arc<StocksState>>,
    Path(ticker): Path<String>,
    query: Result<Query<StockAverageQuery>, QueryRejection>,
) -> ApiResult<Json<AverageReport>> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

    const REQUIRED: &str = "Valid ticker and minutes parameters are required";
    let ticker = Ticker::new(&ticker).map_err(|_| ApiError::bad_request(REQUIRED))?;
    let minutes = parse_minutes(query.minutes.as_deref(), REQUIRED)?;

    if query.aggregation.as_deref() != Some(AVERAGE_AGGREGATION) {
        return Err(ApiError::bad_request("Only average aggregation is supported"));
    }

    debug!(%ticker, %minutes, "Stock average requested");
    let report = state.stats.average(&ticker, &minutes).await?;
    Ok(Json(report))
}

/// 두 종목 상관계수.
///
/// GET /stockcorrelation?ticker=A&ticker=B&minutes=N
pub async fn get_stock_correlation(
    State(state): State<Arc<StocksState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<CorrelationReport>> {
    let Query(pairs) =
        query.map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

    let tickers: Vec<String> = pairs
        .iter()
        .filter(|(k, _)| k == "ticker")
        .map(|(_, v)| v.clone())
        .collect();
    let minutes_raw = pairs
        .iter()
        .find(|(k, _)| k == "minutes")
        .map(|(_, v)| v.as_str());

    const REQUIRED: &str = "Two tickers and valid minutes parameter are required";
    if tickers.is_empty() {
        return Err(ApiError::bad_request(REQUIRED));
    }
    let minutes = parse_minutes(minutes_raw, REQUIRED)?;
    let (first, second) = parse_ticker_pair(&tickers)?;

    debug!(%first, %second, %minutes, "Stock correlation requested");
    let report = state.stats.correlation(&first, &second, &minutes).await?;
    Ok(Json(report))
}

/// 단일 종목 라우터 (`/stocks`에 nest).
pub fn stocks_router() -> Router<Arc<StocksState>> {
    Router::new().route("/{ticker}", get(get_stock_average))
}

/// 상관계수 라우터 (루트에 merge).
pub fn correlation_router() -> Router<Arc<StocksState>> {
    Router::new().route("/stockcorrelation", get(get_stock_correlation))
}
