//! 숫자 윈도우 추적기.
//!
//! 요청한 종류의 숫자를 평가 서비스에서 가져와 프로세스 공유 윈도우에
//! 병합하고, 병합 전후 윈도우와 평균을 돌려줍니다.
//!
//! 윈도우는 종류별로 나뉘지 않으며 모든 요청이 같은 윈도우를 공유합니다.
//! 스냅샷, 병합, 평균 계산은 하나의 잠금 안에서 이뤄지므로 응답의
//! 이전/현재 윈도우 쌍은 항상 해당 요청 자신의 병합 결과입니다.
//! 평가 서비스 호출은 잠금 밖에서 수행됩니다.

use aggregator_analytics::{NumberWindow, WindowUpdate};
use aggregator_core::{NumberKind, ServiceError, ServiceResult};
use aggregator_upstream::NumberSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::metrics::{record_upstream_fetch, set_window_size};

/// `classify_and_fetch` 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReport {
    /// 병합 직전 윈도우
    pub window_prev_state: Vec<f64>,
    /// 병합 직후 윈도우
    pub window_curr_state: Vec<f64>,
    /// 이번에 가져온 숫자 (받은 그대로)
    pub numbers: Vec<f64>,
    /// 병합 직후 윈도우 평균 (소수점 2자리)
    pub avg: f64,
}

impl WindowReport {
    fn new(fetched: Vec<f64>, update: WindowUpdate) -> Self {
        Self {
            window_prev_state: update.previous,
            window_curr_state: update.current,
            numbers: fetched,
            avg: update.average,
        }
    }
}

/// 숫자 윈도우 추적기.
#[derive(Clone)]
pub struct NumberTracker {
    source: Arc<dyn NumberSource>,
    window: Arc<Mutex<NumberWindow>>,
}

impl NumberTracker {
    /// 새 추적기 생성.
    pub fn new(source: Arc<dyn NumberSource>, window: NumberWindow) -> Self {
        Self {
            source,
            window: Arc::new(Mutex::new(window)),
        }
    }

    /// 현재 윈도우 크기.
    pub async fn window_len(&self) -> usize {
        self.window.lock().await.len()
    }

    /// 윈도우 최대 크기.
    pub async fn window_capacity(&self) -> usize {
        self.window.lock().await.capacity()
    }

    /// 라우트 코드(`p|f|e|r`)로 숫자를 가져와 윈도우에 병합합니다.
    ///
    /// # Errors
    /// - 알 수 없는 코드: `InvalidParameters` (윈도우는 변경되지 않음)
    /// - 조회 실패 또는 빈 결과: `UpstreamFetchFailed` (윈도우는 변경되지 않음)
    pub async fn classify_and_fetch(&self, code: &str) -> ServiceResult<WindowReport> {
        let kind: NumberKind = code.parse()?;
        self.fetch_and_merge(kind).await
    }

    /// 주어진 종류의 숫자를 가져와 윈도우에 병합합니다.
    pub async fn fetch_and_merge(&self, kind: NumberKind) -> ServiceResult<WindowReport> {
        let fetched = match self.source.fetch_numbers(kind).await {
            Ok(numbers) => numbers,
            Err(e) => {
                warn!(%kind, error = %e, "Number fetch failed");
                record_upstream_fetch("numbers", e.kind());
                return Err(ServiceError::UpstreamFetchFailed(
                    "Failed to fetch numbers".to_string(),
                ));
            }
        };

        // 빈 목록은 호출 실패와 같게 취급
        if fetched.is_empty() {
            warn!(%kind, "Upstream returned no numbers");
            record_upstream_fetch("numbers", "empty");
            return Err(ServiceError::UpstreamFetchFailed(
                "Failed to fetch numbers".to_string(),
            ));
        }
        record_upstream_fetch("numbers", "ok");

        let update = self.window.lock().await.merge(&fetched);
        set_window_size(update.current.len());

        info!(
            %kind,
            fetched = fetched.len(),
            accepted = update.accepted,
            evicted = update.evicted,
            window = update.current.len(),
            avg = update.average,
            "Window updated"
        );

        Ok(WindowReport::new(fetched, update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticNumberSource;

    fn tracker(source: StaticNumberSource) -> NumberTracker {
        NumberTracker::new(Arc::new(source), NumberWindow::new(10).unwrap())
    }

    #[tokio::test]
    async fn test_first_fetch_fills_window() {
        let source = StaticNumberSource::new().with(NumberKind::Even, vec![2.0, 4.0, 6.0, 8.0]);
        let report = tracker(source).classify_and_fetch("e").await.unwrap();

        assert!(report.window_prev_state.is_empty());
        assert_eq!(report.window_curr_state, vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(report.numbers, vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(report.avg, 5.0);
    }

    #[tokio::test]
    async fn test_window_shared_across_kinds() {
        let source = StaticNumberSource::new()
            .with(NumberKind::Prime, vec![2.0, 3.0, 5.0])
            .with(NumberKind::Fibonacci, vec![1.0, 2.0, 3.0, 5.0, 8.0]);
        let tracker = tracker(source);

        tracker.classify_and_fetch("p").await.unwrap();
        let report = tracker.classify_and_fetch("f").await.unwrap();

        assert_eq!(report.window_prev_state, vec![2.0, 3.0, 5.0]);
        assert_eq!(report.window_curr_state, vec![2.0, 3.0, 5.0, 1.0, 8.0]);
        assert_eq!(report.numbers, vec![1.0, 2.0, 3.0, 5.0, 8.0]);
        assert_eq!(report.avg, 3.8);
    }

    #[tokio::test]
    async fn test_invalid_code_leaves_window_untouched() {
        let source = StaticNumberSource::new().with(NumberKind::Prime, vec![7.0]);
        let tracker = tracker(source);
        tracker.classify_and_fetch("p").await.unwrap();

        let err = tracker.classify_and_fetch("x").await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(tracker.window_len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_fetch_is_upstream_failure() {
        let source = StaticNumberSource::new().with(NumberKind::Random, vec![]);
        let err = tracker(source).classify_and_fetch("r").await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::UpstreamFetchFailed("Failed to fetch numbers".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_error_is_upstream_failure() {
        // 등록되지 않은 종류는 에러를 반환하도록 구성됨
        let source = StaticNumberSource::new();
        let tracker = tracker(source);
        let err = tracker.classify_and_fetch("p").await.unwrap_err();
        assert!(!err.is_client_error());
        assert_eq!(tracker.window_len().await, 0);
    }
}
