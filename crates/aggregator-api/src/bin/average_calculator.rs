//! 숫자 윈도우 평균 계산 서버.
//!
//! `GET /numbers/{type}` 요청마다 평가 서비스에서 숫자를 가져와
//! 프로세스 공유 윈도우에 병합하고 평균을 반환합니다.

use std::sync::Arc;

use aggregator_analytics::NumberWindow;
use aggregator_api::{
    bootstrap, build_app, create_numbers_router, serve, socket_addr, NumberTracker, NumbersState,
};
use aggregator_upstream::{ClientConfig, EvaluationClient};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, metrics_handle) = bootstrap()?;

    info!("Starting average calculator...");

    let client = EvaluationClient::new(ClientConfig::from(&config.upstream))?;
    let window = NumberWindow::new(config.window.size)?;
    info!(
        base_url = %config.upstream.base_url,
        window_size = config.window.size,
        "Number tracker initialized"
    );

    let state = Arc::new(NumbersState::new(NumberTracker::new(Arc::new(client), window)));
    let app = build_app(create_numbers_router().with_state(state), metrics_handle);

    let addr = socket_addr(&config.server.host, config.server.numbers_port)?;
    serve("average-calculator", addr, app).await
}
