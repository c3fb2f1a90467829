use std::net::SocketAddr;
use std::time::Duration;

use hyper::{Body, Client, Method, Request};
use tokio::sync::oneshot;
use vehicle_validation_gateway::{server::start, GatewayConfig, GatewayError, ValidationResponse};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REGION: &str = "3906ba89-153c-4038-8e36-0ca1deb76076";

async fn mock_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "integration-token",
            "token_type": "Bearer",
            "expires_in": 300
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mock_vehicle(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/charge_registrations/{}/{}", REGION, id)))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn config(upstream: &MockServer) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        validation_url: format!("{}/charge_registrations", upstream.uri()),
        token_url: format!("{}/auth/connect/token", upstream.uri()),
        client_secret: "integration-secret".to_string(),
        request_timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }
}

async fn spawn_gateway(upstream: &MockServer) -> (SocketAddr, oneshot::Sender<()>) {
    let (tx, rx) = oneshot::channel::<()>();
    let (addr, server) = start(config(upstream), async move {
        rx.await.ok();
    })
    .await
    .unwrap();
    tokio::spawn(server);
    (addr, tx)
}

async fn get_validation(addr: SocketAddr, id: &str) -> (u16, ValidationResponse) {
    let client = Client::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("http://{}/validation/{}", addr, id))
        .body(Body::empty())
        .unwrap();

    let resp = client.request(req).await.unwrap();
    let status = resp.status().as_u16();
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");
    let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_single_valid_charge() {
    let upstream = MockServer::start().await;
    mock_token(&upstream).await;
    mock_vehicle(
        &upstream,
        "1AB2345",
        serde_json::json!({
            "vehicle": {"licensePlate": "1AB2345"},
            "charges": [{"isCurrentlyValid": true, "validUntil": "2025-01-01T00:00:00Z"}]
        }),
    )
    .await;

    let (addr, shutdown) = spawn_gateway(&upstream).await;
    let (status, body) = get_validation(addr, "1AB2345").await;

    assert_eq!(status, 200);
    assert_eq!(body.id, "1AB2345");
    assert!(body.valid);
    assert_eq!(body.valid_until.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_no_charges() {
    let upstream = MockServer::start().await;
    mock_token(&upstream).await;
    mock_vehicle(
        &upstream,
        "9XY1111",
        serde_json::json!({"vehicle": {"licensePlate": "9XY1111"}, "charges": []}),
    )
    .await;

    let (addr, shutdown) = spawn_gateway(&upstream).await;
    let before = chrono::Utc::now();
    let (status, body) = get_validation(addr, "9XY1111").await;
    let after = chrono::Utc::now();

    assert_eq!(status, 200);
    assert_eq!(body.id, "9XY1111");
    assert!(!body.valid);
    let valid_until = body.valid_until.with_timezone(&chrono::Utc);
    assert!(valid_until >= before && valid_until <= after);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_later_charge_wins() {
    let upstream = MockServer::start().await;
    mock_token(&upstream).await;
    mock_vehicle(
        &upstream,
        "5CD6789",
        serde_json::json!({
            "vehicle": {"licensePlate": "5CD6789"},
            "charges": [
                {"isCurrentlyValid": true, "validUntil": "2025-06-01T00:00:00Z"},
                {"isCurrentlyValid": true, "validUntil": "2025-03-01T00:00:00Z"}
            ]
        }),
    )
    .await;

    let (addr, shutdown) = spawn_gateway(&upstream).await;
    let (_, body) = get_validation(addr, "5CD6789").await;

    assert!(body.valid);
    assert_eq!(body.valid_until.to_rfc3339(), "2025-06-01T00:00:00+00:00");
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_token_is_fetched_once() {
    let upstream = MockServer::start().await;
    mock_token(&upstream).await;
    mock_vehicle(
        &upstream,
        "1AB2345",
        serde_json::json!({"vehicle": {"licensePlate": "1AB2345"}}),
    )
    .await;

    let (addr, shutdown) = spawn_gateway(&upstream).await;
    for _ in 0..3 {
        let (status, _) = get_validation(addr, "1AB2345").await;
        assert_eq!(status, 200);
    }
    let _ = shutdown.send(());
    // mock_token's expect(1) is verified when `upstream` drops
}

#[tokio::test]
async fn test_startup_fails_without_token() {
    let config = GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        token_url: "http://127.0.0.1:1/auth/connect/token".to_string(),
        client_secret: "integration-secret".to_string(),
        ..GatewayConfig::default()
    };

    let result = start(config, std::future::pending()).await;
    assert!(matches!(result, Err(GatewayError::TokenAcquisition(_))));
}

#[tokio::test]
async fn test_startup_fails_without_secret() {
    let upstream = MockServer::start().await;
    let mut config = config(&upstream);
    config.client_secret.clear();

    let result = start(config, std::future::pending()).await;
    assert!(matches!(result, Err(GatewayError::Config(_))));
    assert!(upstream.received_requests().await.unwrap().is_empty());
}
