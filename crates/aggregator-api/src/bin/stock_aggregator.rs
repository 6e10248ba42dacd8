//! 주가 통계 서버.
//!
//! 평가 서비스의 가격 이력으로 종목별 평균 가격과
//! 두 종목 간 피어슨 상관계수를 계산합니다.

use std::sync::Arc;

use aggregator_api::{
    bootstrap, build_app, create_stocks_router, serve, socket_addr, StockStatistics, StocksState,
};
use aggregator_upstream::{ClientConfig, EvaluationClient};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, metrics_handle) = bootstrap()?;

    info!("Starting stock aggregator...");

    let client = EvaluationClient::new(ClientConfig::from(&config.upstream))?;
    info!(base_url = %config.upstream.base_url, "Price source initialized");

    let state = Arc::new(StocksState::new(StockStatistics::new(Arc::new(client))));
    let app = build_app(create_stocks_router().with_state(state), metrics_handle);

    let addr = socket_addr(&config.server.host, config.server.stocks_port)?;
    serve("stock-aggregator", addr, app).await
}
