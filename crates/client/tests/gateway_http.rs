//! Black-box gateway tests against a mock backend on an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use merchantdesk_auth::AuthToken;
use merchantdesk_client::{
    error_message, ApiError, Gateway, GatewayConfig, RequestOptions, TokenProvider,
    UnauthorizedObserver,
};
use merchantdesk_core::{BusinessId, UserId};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

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

struct StaticTokens(Option<AuthToken>);

impl TokenProvider for StaticTokens {
    fn token(&self) -> Option<AuthToken> {
        self.0.clone()
    }
}

#[derive(Default)]
struct CountingObserver(AtomicUsize);

impl UnauthorizedObserver for CountingObserver {
    fn on_unauthorized(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn gateway(base_url: &str, token: Option<&str>) -> Gateway {
    Gateway::new(
        GatewayConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        },
        Arc::new(StaticTokens(token.map(|t| AuthToken::new(t).unwrap()))),
    )
    .expect("failed to build gateway")
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": auth }))
}

#[tokio::test]
async fn bearer_token_is_attached_to_every_request() {
    let srv = TestServer::spawn(Router::new().route("/echo-auth", get(echo_auth))).await;
    let gw = gateway(&srv.base_url, Some("tk-123"));

    let body = gw
        .get_json("/echo-auth", &[], RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(body["authorization"], "Bearer tk-123");
}

#[tokio::test]
async fn requests_without_a_session_carry_no_bearer() {
    let srv = TestServer::spawn(Router::new().route("/echo-auth", get(echo_auth))).await;
    let gw = gateway(&srv.base_url, None);

    let body = gw
        .get_json("/echo-auth", &[], RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(body["authorization"], Value::Null);
}

#[tokio::test]
async fn unauthorized_responses_notify_the_observer() {
    let app = Router::new().route(
        "/protected",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "expired"}))) }),
    );
    let srv = TestServer::spawn(app).await;
    let gw = gateway(&srv.base_url, Some("stale"));
    let observer = Arc::new(CountingObserver::default());
    gw.set_unauthorized_observer(observer.clone());

    let err = gw
        .get_json("/protected", &[], RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(observer.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn skip_flag_suppresses_the_observer() {
    let app = Router::new().route(
        "/auth/login",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad credentials"}))) }),
    );
    let srv = TestServer::spawn(app).await;
    let gw = gateway(&srv.base_url, None);
    let observer = Arc::new(CountingObserver::default());
    gw.set_unauthorized_observer(observer.clone());

    let err = gw
        .post_json(
            "/auth/login",
            &json!({"email": "a@b.c"}),
            RequestOptions::skip_auth_redirect(),
        )
        .await
        .unwrap_err();

    assert_eq!(error_message(&err), "bad credentials");
    assert_eq!(observer.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn owned_businesses_accepts_all_three_list_shapes() {
    let business = json!({"id": 5, "name": "Corner Shop", "ownerId": 8});
    let shapes = [
        json!([business.clone()]),
        json!({"content": [business.clone()], "totalPages": 1}),
        json!({"items": [business.clone()]}),
    ];

    for shape in shapes {
        let app = Router::new().route(
            "/businesses/owner/:id",
            get(move || {
                let shape = shape.clone();
                async move { Json(shape) }
            }),
        );
        let srv = TestServer::spawn(app).await;
        let gw = gateway(&srv.base_url, Some("tk"));

        let businesses = gw.owned_businesses(UserId::new(8)).await.unwrap();
        assert_eq!(businesses.len(), 1);
        assert_eq!(businesses[0].id, BusinessId::new(5));
        assert_eq!(businesses[0].name, "Corner Shop");
    }
}

#[tokio::test]
async fn unknown_list_shape_is_a_typed_error_not_an_empty_list() {
    let app = Router::new().route(
        "/businesses/owner/:id",
        get(|| async { Json(json!({"businesses": []})) }),
    );
    let srv = TestServer::spawn(app).await;
    let gw = gateway(&srv.base_url, Some("tk"));

    let err = gw.owned_businesses(UserId::new(8)).await.unwrap_err();
    assert!(matches!(err, ApiError::Shape(_)));
}

#[tokio::test]
async fn create_business_sends_a_business_json_part_and_decodes_the_id() {
    async fn accept(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() == Some("business") {
                let text = field.text().await.unwrap();
                let business: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(business["name"], "Ada Store");
                assert_eq!(business["openingHours"].as_array().unwrap().len(), 7);
                return (StatusCode::CREATED, Json(json!({"business": {"id": 77}})));
            }
        }
        (StatusCode::BAD_REQUEST, Json(json!({"message": "missing part"})))
    }

    let app = Router::new().route("/businesses", post(accept));
    let srv = TestServer::spawn(app).await;
    let gw = gateway(&srv.base_url, Some("tk"));

    let user: merchantdesk_auth::UserAccount = serde_json::from_value(json!({
        "id": 8, "name": "Ada", "email": "ada@example.com", "role": "BUSINESS_MARKET"
    }))
    .unwrap();
    let id = gw
        .create_business(&merchantdesk_client::NewBusiness::default_for_owner(&user))
        .await
        .unwrap();
    assert_eq!(id, BusinessId::new(77));
}

#[tokio::test]
async fn server_error_details_surface_through_error_message() {
    let app = Router::new().route(
        "/businesses",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"details": ["name is required", "email is required"]})),
            )
        }),
    );
    let srv = TestServer::spawn(app).await;
    let gw = gateway(&srv.base_url, Some("tk"));

    let err = gw
        .post_json("/businesses", &json!({}), RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(error_message(&err), "name is required");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port 9 (discard) is not listening.
    let gw = gateway("http://127.0.0.1:9", None);
    let err = gw
        .get_json("/anything", &[], RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_ne!(error_message(&err), "");
}
