use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::StatusCode;

use stockroom_api::app::routes::system;
use stockroom_api::middleware::{AuthState, auth_middleware};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the auth gate in front of `/whoami` on an ephemeral port.
    /// The gate performs no database access, so no mongod is needed.
    async fn spawn(jwt_secret: &str) -> Self {
        let state = AuthState {
            jwt_secret: Arc::new(jwt_secret.as_bytes().to_vec()),
        };
        let app = Router::new()
            .route("/whoami", get(system::whoami))
            .layer(from_fn_with_state(state, auth_middleware));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(serde::Serialize)]
struct TestClaims<'a> {
    uid: &'a str,
    name: &'a str,
    role: &'a str,
    iat: i64,
    exp: i64,
}

fn mint_jwt(jwt_secret: &str, lifetime: Duration) -> String {
    let now = Utc::now();
    let claims = TestClaims {
        uid: "u-42",
        name: "Counter Staff",
        role: "seller",
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn missing_token_is_rejected_with_envelope() {
    let server = TestServer::spawn("test-secret").await;

    let res = reqwest::get(format!("{}/whoami", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["msg"], "No token in request");
}

#[tokio::test]
async fn garbage_token_is_rejected_with_envelope() {
    let server = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/whoami", server.base_url))
        .bearer_auth("definitely-not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["msg"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let server = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = mint_jwt("test-secret", Duration::minutes(-10));
    let res = client
        .get(format!("{}/whoami", server.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["msg"], "Invalid token");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let server = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = mint_jwt("other-secret", Duration::minutes(10));
    let res = client
        .get(format!("{}/whoami", server.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_the_handler_with_claims_attached() {
    let server = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let token = mint_jwt("test-secret", Duration::minutes(10));
    let res = client
        .get(format!("{}/whoami", server.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["result"]["uid"], "u-42");
    assert_eq!(body["result"]["name"], "Counter Staff");
    assert_eq!(body["result"]["role"], "seller");
}
