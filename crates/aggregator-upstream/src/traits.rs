//! 데이터 소스 trait 정의.
//!
//! 서비스 로직은 이 trait에만 의존하므로 같은 응답 형태를 주는
//! 어떤 구현체로도 교체할 수 있습니다.

use aggregator_core::{Minutes, NumberKind, PriceEntry, Ticker};
use async_trait::async_trait;

use crate::UpstreamError;

/// 평가 서비스 호출을 위한 Result 타입.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// 종류별 숫자 목록 제공자.
#[async_trait]
pub trait NumberSource: Send + Sync {
    /// 주어진 종류의 숫자 목록을 받은 순서대로 반환합니다.
    async fn fetch_numbers(&self, kind: NumberKind) -> UpstreamResult<Vec<f64>>;
}

/// 종목 가격 이력 제공자.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// 최근 `minutes`분 동안의 가격 이력을 시간순으로 반환합니다.
    async fn fetch_prices(
        &self,
        ticker: &Ticker,
        minutes: &Minutes,
    ) -> UpstreamResult<Vec<PriceEntry>>;
}
