//! 서버 공통 부트스트랩.
//!
//! 두 서비스 바이너리가 공유하는 설정 로드, 로깅/메트릭 초기화,
//! 미들웨어 조합, graceful shutdown을 담당합니다.

use std::net::SocketAddr;
use std::time::Duration;

use aggregator_core::{init_logging, AppConfig, LogConfig};
use anyhow::Context;
use axum::{extract::State, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::metrics::setup_metrics_recorder;
use crate::middleware::metrics_layer;

/// `.env` → 설정 → 로깅 → 메트릭 레코더 순서로 초기화합니다.
///
/// 설정 파일 경로는 `AGGREGATOR_CONFIG` 환경 변수로 바꿀 수 있습니다.
pub fn bootstrap() -> anyhow::Result<(AppConfig, PrometheusHandle)> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let path = std::env::var("AGGREGATOR_CONFIG")
        .unwrap_or_else(|_| "config/default.toml".to_string());
    let config = AppConfig::load(&path).with_context(|| format!("설정 로드 실패: {}", path))?;

    init_logging(LogConfig::from_config(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let metrics_handle = setup_metrics_recorder().context("Prometheus 레코더 설치 실패")?;
    info!(config_path = %path, "Configuration loaded");

    Ok((config, metrics_handle))
}

/// `host:port` 소켓 주소.
pub fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("소켓 주소가 유효하지 않습니다: {}:{}", host, port))
}

/// CORS 미들웨어. 읽기 전용 서비스이므로 모든 origin의 GET을 허용합니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// 상태가 주입된 API 라우터에 메트릭 엔드포인트와 공통 미들웨어를 붙입니다.
///
/// 요청 타임아웃은 걸지 않습니다. 평가 서비스가 응답하지 않으면 요청도 대기합니다.
pub fn build_app(api_router: Router, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(api_router)
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// 서버를 시작하고 종료 시그널까지 대기합니다.
pub async fn serve(service: &str, addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    info!(%service, %addr, "Server listening");
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(%service, "Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
