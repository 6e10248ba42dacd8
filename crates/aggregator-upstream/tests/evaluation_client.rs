//! EvaluationClient 통합 테스트 (mockito HTTP 서버 사용).

use aggregator_core::{Minutes, NumberKind, Ticker};
use aggregator_upstream::{ClientConfig, EvaluationClient, NumberSource, PriceSource, UpstreamError};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> EvaluationClient {
    let base = format!("{}/evaluation-service", server.url());
    EvaluationClient::new(ClientConfig::new(base)).expect("client")
}

#[tokio::test]
async fn test_fetch_numbers_uses_kind_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/evaluation-service/fibo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"numbers":[1,2,3,5,8,13]}"#)
        .create_async()
        .await;

    let numbers = client_for(&server)
        .fetch_numbers(NumberKind::Fibonacci)
        .await
        .unwrap();

    assert_eq!(numbers, vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_numbers_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/evaluation-service/primes")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_numbers(NumberKind::Prime)
        .await
        .unwrap_err();

    match err {
        UpstreamError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_numbers_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/evaluation-service/even")
        .with_status(200)
        .with_body(r#"{"values":[2,4]}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_numbers(NumberKind::Even)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "parse");
}

#[tokio::test]
async fn test_fetch_prices_passes_minutes_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/evaluation-service/stocks/NVDA")
        .match_query(Matcher::UrlEncoded("minutes".into(), "50".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"price":231.95,"lastUpdatedAt":"2025-05-08T04:26:27.465134"},
                {"price":124.95,"lastUpdatedAt":"2025-05-08T04:30:23.465940"}
            ]"#,
        )
        .create_async()
        .await;

    let ticker = Ticker::new("NVDA").unwrap();
    let prices = client_for(&server)
        .fetch_prices(&ticker, &Minutes::parse("50").unwrap())
        .await
        .unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[0].price, 231.95);
    assert_eq!(prices[1].last_updated_at, "2025-05-08T04:30:23.465940");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_prices_forwards_minutes_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/evaluation-service/stocks/NVDA")
        .match_query(Matcher::UrlEncoded("minutes".into(), "1.5".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    client_for(&server)
        .fetch_prices(&Ticker::new("NVDA").unwrap(), &Minutes::parse("1.5").unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_prices_sends_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/evaluation-service/stocks/AMD")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer t0ken")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut config = ClientConfig::new(format!("{}/evaluation-service", server.url()));
    config.auth_token = Some("t0ken".to_string());
    let client = EvaluationClient::new(config).unwrap();

    let prices = client
        .fetch_prices(&Ticker::new("AMD").unwrap(), &Minutes::parse("10").unwrap())
        .await
        .unwrap();

    assert!(prices.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // 아무도 듣지 않는 포트
    let client = EvaluationClient::new(ClientConfig::new("http://127.0.0.1:1/evaluation-service"))
        .unwrap();

    let err = client.fetch_numbers(NumberKind::Random).await.unwrap_err();
    assert_eq!(err.kind(), "network");
}
