//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 서비스 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설치하고 핸들을 반환합니다.
///
/// # Errors
///
/// 레코더가 이미 설치되어 있거나 버킷 설정이 잘못되면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 처리 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 서비스 메트릭
// ============================================================================

/// 평가 서비스 호출 결과 카운터 증가.
///
/// `outcome`은 "ok", "empty" 또는 [`UpstreamError::kind`](aggregator_upstream::UpstreamError::kind) 값입니다.
pub fn record_upstream_fetch(source: &str, outcome: &str) {
    counter!(
        "upstream_fetch_total",
        "source" => source.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// 현재 숫자 윈도우 크기 설정.
pub fn set_window_size(len: usize) {
    gauge!("number_window_size").set(len as f64);
}

// ============================================================================
// 경로 정규화
// ============================================================================

/// 라벨 수가 늘어나지 않도록 경로의 가변 세그먼트를 정규화합니다.
///
/// 예: `/stocks/NVDA` → `/stocks/:ticker`.
/// `/numbers/:type`은 유효 값이 넷뿐이라 그대로 둡니다.
pub fn normalize_path(path: &str) -> String {
    let mut segments = path.split('/').peekable();
    let mut normalized = Vec::new();
    while let Some(segment) = segments.next() {
        normalized.push(segment.to_string());
        if segment == "stocks" && segments.peek().is_some_and(|s| !s.is_empty()) {
            segments.next();
            normalized.push(":ticker".to_string());
        }
    }
    normalized.join("/")
}
