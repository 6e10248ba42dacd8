//! 테스트용 데이터 소스와 상태 헬퍼.
//!
//! 실제 평가 서비스 없이 라우터와 서비스를 테스트할 수 있도록
//! 미리 정해진 응답을 돌려주는 구현체를 제공합니다.

use aggregator_analytics::NumberWindow;
use aggregator_core::{Minutes, NumberKind, PriceEntry, Ticker};
use aggregator_upstream::{NumberSource, PriceSource, UpstreamError, UpstreamResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::services::{NumberTracker, StockStatistics};
use crate::state::{NumbersState, StocksState};

/// 종류별로 고정된 숫자를 반환하는 소스.
///
/// 등록되지 않은 종류는 `Status 503` 에러를 반환합니다.
#[derive(Debug, Default, Clone)]
pub struct StaticNumberSource {
    numbers: HashMap<NumberKind, Vec<f64>>,
}

impl StaticNumberSource {
    /// 빈 소스 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 종류별 응답 등록.
    pub fn with(mut self, kind: NumberKind, numbers: Vec<f64>) -> Self {
        self.numbers.insert(kind, numbers);
        self
    }
}

#[async_trait]
impl NumberSource for StaticNumberSource {
    async fn fetch_numbers(&self, kind: NumberKind) -> UpstreamResult<Vec<f64>> {
        self.numbers
            .get(&kind)
            .cloned()
            .ok_or_else(|| UpstreamError::Status {
                status: 503,
                body: format!("no numbers for {}", kind),
            })
    }
}

/// 티커별로 고정된 가격 이력을 반환하는 소스.
///
/// 등록되지 않은 티커는 `Status 404` 에러를 반환합니다.
#[derive(Debug, Default, Clone)]
pub struct StaticPriceSource {
    prices: HashMap<String, Vec<PriceEntry>>,
}

impl StaticPriceSource {
    /// 빈 소스 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 티커별 응답 등록.
    pub fn with(mut self, ticker: &str, history: Vec<PriceEntry>) -> Self {
        self.prices.insert(ticker.to_string(), history);
        self
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn fetch_prices(
        &self,
        ticker: &Ticker,
        _minutes: &Minutes,
    ) -> UpstreamResult<Vec<PriceEntry>> {
        self.prices
            .get(ticker.as_str())
            .cloned()
            .ok_or_else(|| UpstreamError::Status {
                status: 404,
                body: format!("unknown ticker {}", ticker),
            })
    }
}

/// 가격 목록으로 분 단위 타임스탬프가 붙은 이력 생성.
pub fn price_series(prices: &[f64]) -> Vec<PriceEntry> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| PriceEntry::new(*p, format!("2025-05-08T04:{:02}:00.000000", i % 60)))
        .collect()
}

/// 테스트용 평균 계산 서비스 상태 (윈도우 크기 10).
pub fn create_numbers_test_state(source: StaticNumberSource) -> NumbersState {
    let window = NumberWindow::new(10).expect("non-zero capacity");
    NumbersState::new(NumberTracker::new(Arc::new(source), window))
}

/// 테스트용 주가 집계 서비스 상태.
pub fn create_stocks_test_state(source: StaticPriceSource) -> StocksState {
    StocksState::new(StockStatistics::new(Arc::new(source)))
}
