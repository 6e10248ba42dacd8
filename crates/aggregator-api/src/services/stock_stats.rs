//! 주가 통계 엔진.
//!
//! 평가 서비스에서 가격 이력을 가져와 평균 가격과
//! 두 종목 간 Pearson 상관계수를 계산합니다.

use aggregator_analytics::{average_price, price_correlation};
use aggregator_core::{Minutes, PriceEntry, ServiceError, ServiceResult, Ticker};
use aggregator_upstream::PriceSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::metrics::record_upstream_fetch;

/// 단일 종목 평균 결과 (`GET /stocks/{ticker}` 응답).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageReport {
    /// 평균 가격 (소수점 6자리)
    pub average_stock_price: f64,
    /// 가격 이력 (받은 그대로)
    pub price_history: Vec<PriceEntry>,
}

/// 상관계수 응답에 포함되는 종목별 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// 전체 이력 기준 평균 가격 (소수점 6자리)
    pub average_price: f64,
    /// 전체 가격 이력
    pub price_history: Vec<PriceEntry>,
}

impl StockSummary {
    fn from_history(price_history: Vec<PriceEntry>) -> Self {
        Self {
            average_price: average_price(&price_history),
            price_history,
        }
    }
}

/// 두 종목 상관계수 결과 (`GET /stockcorrelation` 응답).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Pearson 상관계수 (소수점 4자리)
    pub correlation: f64,
    /// 티커별 요약
    pub stocks: BTreeMap<String, StockSummary>,
}

/// 주가 통계 엔진.
#[derive(Clone)]
pub struct StockStatistics {
    source: Arc<dyn PriceSource>,
}

impl StockStatistics {
    /// 새 엔진 생성.
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }

    /// 가격 이력 조회. 실패는 `UpstreamFetchFailed`로 변환됩니다.
    async fn fetch(&self, ticker: &Ticker, minutes: &Minutes) -> ServiceResult<Vec<PriceEntry>> {
        match self.source.fetch_prices(ticker, minutes).await {
            Ok(prices) => {
                record_upstream_fetch("stocks", "ok");
                Ok(prices)
            }
            Err(e) => {
                warn!(%ticker, %minutes, error = %e, "Price fetch failed");
                record_upstream_fetch("stocks", e.kind());
                Err(ServiceError::UpstreamFetchFailed(format!(
                    "Failed to fetch stock data for {}",
                    ticker
                )))
            }
        }
    }

    /// 최근 `minutes`분 평균 가격.
    pub async fn average(&self, ticker: &Ticker, minutes: &Minutes) -> ServiceResult<AverageReport> {
        let price_history = self.fetch(ticker, minutes).await?;
        let average_stock_price = average_price(&price_history);

        info!(
            %ticker,
            minutes = minutes.value(),
            points = price_history.len(),
            average = average_stock_price,
            "Average price computed"
        );

        Ok(AverageReport {
            average_stock_price,
            price_history,
        })
    }

    /// 두 종목의 Pearson 상관계수.
    ///
    /// 두 이력을 동시에 조회하며, 하나라도 실패하면 전체가 실패합니다.
    /// 상관계수는 짧은 쪽 길이에 맞춰 위치 기준으로 계산하고,
    /// 평균 가격과 이력은 각 종목의 전체 이력을 사용합니다.
    ///
    /// # Errors
    /// 두 티커가 같으면 `InvalidParameters`.
    pub async fn correlation(
        &self,
        first: &Ticker,
        second: &Ticker,
        minutes: &Minutes,
    ) -> ServiceResult<CorrelationReport> {
        if first == second {
            return Err(ServiceError::InvalidParameters(
                "Exactly two distinct tickers are required".to_string(),
            ));
        }

        let (history_a, history_b) =
            tokio::try_join!(self.fetch(first, minutes), self.fetch(second, minutes))?;

        let correlation = price_correlation(&history_a, &history_b);

        info!(
            first = %first,
            second = %second,
            minutes = minutes.value(),
            points_a = history_a.len(),
            points_b = history_b.len(),
            correlation,
            "Correlation computed"
        );

        let mut stocks = BTreeMap::new();
        stocks.insert(first.to_string(), StockSummary::from_history(history_a));
        stocks.insert(second.to_string(), StockSummary::from_history(history_b));

        Ok(CorrelationReport {
            correlation,
            stocks,
        })
    }
}
