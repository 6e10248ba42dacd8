//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `AGGREGATOR__*` 환경 변수 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 평가 서비스 주소.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://20.244.56.144/evaluation-service";

/// 기본 윈도우 크기.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// 평균 계산 서비스 기본 포트.
pub const DEFAULT_NUMBERS_PORT: u16 = 9876;

/// 주가 집계 서비스 기본 포트.
pub const DEFAULT_STOCKS_PORT: u16 = 9877;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 평가 서비스 설정
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// 숫자 윈도우 설정
    #[serde(default)]
    pub window: WindowConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 평균 계산 서비스 포트
    pub numbers_port: u16,
    /// 주가 집계 서비스 포트
    pub stocks_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            numbers_port: DEFAULT_NUMBERS_PORT,
            stocks_port: DEFAULT_STOCKS_PORT,
        }
    }
}

/// 평가 서비스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// 기본 URL (경로 접두사 포함, 끝 슬래시 없음)
    pub base_url: String,
    /// 요청 타임아웃 (초). 없으면 타임아웃을 걸지 않습니다.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Bearer 토큰 (선택적)
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_secs: None,
            auth_token: None,
        }
    }
}

/// 숫자 윈도우 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// 윈도우 최대 크기
    pub size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.numbers_port", i64::from(defaults.server.numbers_port))?
            .set_default("server.stocks_port", i64::from(defaults.server.stocks_port))?
            .set_default("upstream.base_url", defaults.upstream.base_url)?
            .set_default("window.size", defaults.window.size as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("AGGREGATOR")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
