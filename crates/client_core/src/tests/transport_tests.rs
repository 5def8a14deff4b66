use std::time::Duration;

use super::*;
use axum::{routing::put, Json, Router};
use serde_json::json;
use shared::domain::CharacterId;
use tokio::net::TcpListener;

fn sample_command() -> AdminCommand {
    AdminCommand::CharacterSetDefault {
        character_id: CharacterId(9),
    }
}

async fn spawn_with_router(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn decoded_envelope_flows_through() {
    let app = Router::new().route(
        "/settings/characters",
        put(|| async { Json(json!({"status": 3, "result": "Downtime at 22:00"})) }),
    );
    let transport = HttpCommandTransport::new(&spawn_with_router(app).await).expect("transport");

    let envelope = transport.submit(&sample_command()).await.expect("envelope");

    assert_eq!(
        envelope,
        ResponseEnvelope::Info {
            result: Some("Downtime at 22:00".to_string())
        }
    );
}

#[tokio::test]
async fn slow_backend_classifies_as_timeout() {
    let app = Router::new().route(
        "/settings/characters",
        put(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"status": 0}))
        }),
    );
    let server_url = spawn_with_router(app).await;
    let transport = HttpCommandTransport::with_timeout(&server_url, Duration::from_millis(100))
        .expect("transport");

    let failure = transport
        .submit(&sample_command())
        .await
        .expect_err("must time out");

    assert_eq!(failure, TransportFailure::Timeout);
}

#[tokio::test]
async fn unreachable_backend_classifies_as_network_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let transport = HttpCommandTransport::new(&format!("http://{addr}")).expect("transport");

    let failure = transport
        .submit(&sample_command())
        .await
        .expect_err("must fail");

    assert!(
        matches!(failure, TransportFailure::Network(_)),
        "unexpected failure: {failure:?}"
    );
    assert!(failure
        .to_string()
        .starts_with("Received error while performing request: "));
}

#[tokio::test]
async fn http_error_status_classifies_as_network_error() {
    let app = Router::new().route(
        "/settings/characters",
        put(|| async {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                "Received fatal error during operation: [Not logged in]",
            )
        }),
    );
    let transport = HttpCommandTransport::new(&spawn_with_router(app).await).expect("transport");

    let failure = transport
        .submit(&sample_command())
        .await
        .expect_err("must fail");

    assert!(
        matches!(failure, TransportFailure::Network(_)),
        "unexpected failure: {failure:?}"
    );
}

#[tokio::test]
async fn non_json_body_classifies_as_unparsable() {
    let app = Router::new().route("/settings/characters", put(|| async { "definitely not json" }));
    let transport = HttpCommandTransport::new(&spawn_with_router(app).await).expect("transport");

    let failure = transport
        .submit(&sample_command())
        .await
        .expect_err("must fail");

    assert_eq!(failure, TransportFailure::Unparsable);
}

#[test]
fn rejects_unparsable_server_url() {
    assert!(HttpCommandTransport::new("not a url").is_err());
}
