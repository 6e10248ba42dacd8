//! 숫자 윈도우 평균 계산 서비스와 주가 통계 서비스의 HTTP 계층.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (두 개의 독립 바이너리)
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 서비스별 공유 상태 (NumbersState, StocksState)
//! - [`routes`]: REST API 엔드포인트
//! - [`services`]: 윈도우 추적기와 주가 통계 엔진
//! - [`error`]: 에러 응답 변환
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`server`]: 부트스트랩과 graceful shutdown

pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::{create_numbers_router, create_stocks_router};
pub use server::{bootstrap, build_app, serve, socket_addr};
pub use services::{
    AverageReport, CorrelationReport, NumberTracker, StockStatistics, StockSummary, WindowReport,
};
pub use state::{NumbersState, ServiceHealth, StocksState};
