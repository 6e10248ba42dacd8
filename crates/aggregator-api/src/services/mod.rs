//! 서비스 로직.
//!
//! 라우트 핸들러는 HTTP 파라미터 해석만 하고, 실제 처리는 이 모듈의
//! 서비스에 위임합니다.

pub mod number_tracker;
pub mod stock_stats;

pub use number_tracker::{NumberTracker, WindowReport};
pub use stock_stats::{AverageReport, CorrelationReport, StockStatistics, StockSummary};
