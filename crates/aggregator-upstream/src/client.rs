//! 평가 서비스 REST 클라이언트.
//!
//! - `GET {base}/primes|/fibo|/even|/rand` → `{ "numbers": [...] }`
//! - `GET {base}/stocks/{ticker}?minutes={n}` → `[{ "price", "lastUpdatedAt" }, ...]`

use aggregator_core::{Minutes, NumberKind, PriceEntry, Ticker, UpstreamConfig};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::traits::{NumberSource, PriceSource, UpstreamResult};
use crate::UpstreamError;

// ============================================================================
// 설정
// ============================================================================

/// 평가 서비스 클라이언트 설정.
///
/// `Debug` 구현은 토큰을 마스킹합니다.
#[derive(Clone)]
pub struct ClientConfig {
    /// 기본 URL (예: `http://20.244.56.144/evaluation-service`)
    pub base_url: String,
    /// 요청 타임아웃. `None`이면 무제한
    pub timeout: Option<Duration>,
    /// Bearer 토큰
    pub auth_token: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "***REDACTED***"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// 기본 URL만으로 설정 생성.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            auth_token: None,
        }
    }
}

impl From<&UpstreamConfig> for ClientConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
        }
    }
}

// ============================================================================
// 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct NumbersResponse {
    numbers: Vec<f64>,
}

// ============================================================================
// 클라이언트
// ============================================================================

/// 평가 서비스 클라이언트.
///
/// 재시도나 캐싱 없이 요청마다 한 번씩 호출합니다.
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    config: ClientConfig,
    base_url: Url,
    client: Client,
}

impl EvaluationClient {
    /// 새 클라이언트 생성.
    ///
    /// # Errors
    /// 기본 URL이 유효하지 않거나 HTTP 클라이언트 생성에 실패하면 에러를 반환합니다.
    pub fn new(config: ClientConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// 기본 URL 뒤에 경로 세그먼트를 붙입니다. 각 세그먼트는 퍼센트 인코딩됩니다.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET 요청 후 JSON 본문을 역직렬화합니다.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> UpstreamResult<T> {
        debug!(url = %url, "GET upstream");

        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream returned non-success status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = serde_json::from_str(&body).inspect_err(|e| {
            warn!(error = %e, body = %body, "Failed to parse upstream response");
        })?;
        Ok(parsed)
    }
}

#[async_trait]
impl NumberSource for EvaluationClient {
    async fn fetch_numbers(&self, kind: NumberKind) -> UpstreamResult<Vec<f64>> {
        let url = self.endpoint(&[kind.upstream_path().trim_start_matches('/')]);
        let resp: NumbersResponse = self.get_json(url, &[]).await?;
        debug!(%kind, count = resp.numbers.len(), "Fetched numbers");
        Ok(resp.numbers)
    }
}

#[async_trait]
impl PriceSource for EvaluationClient {
    async fn fetch_prices(
        &self,
        ticker: &Ticker,
        minutes: &Minutes,
    ) -> UpstreamResult<Vec<PriceEntry>> {
        let url = self.endpoint(&["stocks", ticker.as_str()]);
        let prices: Vec<PriceEntry> = self
            .get_json(url, &[("minutes", minutes.as_str().to_string())])
            .await?;
        debug!(%ticker, %minutes, count = prices.len(), "Fetched price history");
        Ok(prices)
    }
}
