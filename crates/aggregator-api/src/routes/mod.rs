//! API 라우트.
//!
//! # 라우트 구조
//!
//! 평균 계산 서비스:
//! - `/numbers/{type}` - 숫자 윈도우 갱신
//! - `/health`, `/health/ready` - 헬스 체크
//!
//! 주가 집계 서비스:
//! - `/stocks/{ticker}` - 평균 가격
//! - `/stockcorrelation` - 두 종목 상관계수
//! - `/health`, `/health/ready` - 헬스 체크

pub mod health;
pub mod numbers;
pub mod stocks;

pub use health::{health_router, HealthResponse};
pub use numbers::numbers_router;
pub use stocks::{correlation_router, parse_ticker_pair, stocks_router, StockAverageQuery};

use axum::Router;
use std::sync::Arc;

use crate::state::{NumbersState, StocksState};

/// 평균 계산 서비스 API 라우터 생성.
pub fn create_numbers_router() -> Router<Arc<NumbersState>> {
    Router::new()
        .nest("/health", health_router::<NumbersState>())
        .nest("/numbers", numbers_router())
}

/// 주가 집계 서비스 API 라우터 생성.
pub fn create_stocks_router() -> Router<Arc<StocksState>> {
    Router::new()
        .nest("/health", health_router::<StocksState>())
        .nest("/stocks", stocks_router())
        .merge(correlation_router())
}
