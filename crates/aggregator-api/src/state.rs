//! 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 각 서비스 바이너리는 자기 상태를 `Arc`로 감싸 Axum의 State extractor로 주입합니다.
//! 숫자 윈도우도 전역 변수가 아니라 이 상태가 소유합니다.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::services::{NumberTracker, StockStatistics};

/// 헬스 체크에서 사용하는 서비스 공통 정보.
#[async_trait]
pub trait ServiceHealth: Send + Sync + 'static {
    /// 서비스 이름.
    fn service_name(&self) -> &'static str;

    /// 서버 시작 시간.
    fn started_at(&self) -> chrono::DateTime<chrono::Utc>;

    /// 서비스별 추가 정보 (선택적).
    async fn details(&self) -> Option<Value> {
        None
    }

    /// 서버 업타임(초).
    fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at())
            .num_seconds()
    }
}

/// 평균 계산 서비스 상태.
#[derive(Clone)]
pub struct NumbersState {
    /// 숫자 윈도우 추적기 (프로세스 공유 윈도우 소유)
    pub tracker: NumberTracker,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl NumbersState {
    /// 새 상태 생성.
    pub fn new(tracker: NumberTracker) -> Self {
        Self {
            tracker,
            started_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl ServiceHealth for NumbersState {
    fn service_name(&self) -> &'static str {
        "average-calculator"
    }

    fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    async fn details(&self) -> Option<Value> {
        Some(json!({
            "window_size": self.tracker.window_len().await,
            "window_capacity": self.tracker.window_capacity().await,
        }))
    }
}

/// 주가 집계 서비스 상태.
#[derive(Clone)]
pub struct StocksState {
    /// 주가 통계 엔진
    pub stats: StockStatistics,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl StocksState {
    /// 새 상태 생성.
    pub fn new(stats: StockStatistics) -> Self {
        Self {
            stats,
            started_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl ServiceHealth for StocksState {
    fn service_name(&self) -> &'static str {
        "stock-aggregator"
    }

    fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }
}
