//! Router-level tests: health, landing, and the gate's redirect behavior.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobdeck_api::{create_router, ApiConfig, AppState};

/// Spin up an app whose identity provider and backend are stubs.
async fn test_app(jwks_server: &MockServer) -> axum::Router {
    std::env::set_var("CLERK_PUBLISHABLE_KEY", "pk_test_Y2xlcmsuZXhhbXBsZS5jb20k");
    std::env::set_var("CLERK_FRONTEND_API", jwks_server.uri());
    std::env::set_var("SUPABASE_URL", jwks_server.uri());
    std::env::set_var("SUPABASE_ANON_KEY", "anon-key");

    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keys": [] })))
        .mount(jwks_server)
        .await;

    let state = AppState::new(ApiConfig::default()).await.unwrap();
    create_router(state, None)
}

#[tokio::test]
#[serial]
async fn health_endpoint_is_public() {
    let jwks = MockServer::start().await;
    let app = test_app(&jwks).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn landing_reads_the_sign_in_marker() {
    let jwks = MockServer::start().await;
    let app = test_app(&jwks).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?sign-in=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let view: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(view["sign_in_prompt"], json!(true));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let view: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(view["sign_in_prompt"], json!(false));
}

// A signed-out request to any protected route answers one redirect to the
// home route with the sign-in marker.
#[tokio::test]
#[serial]
async fn protected_routes_redirect_signed_out_users() {
    let jwks = MockServer::start().await;
    let app = test_app(&jwks).await;

    for uri in ["/jobs", "/job/42", "/saved-jobs", "/my-jobs", "/onboarding"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri: {}", uri);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/?sign-in=true",
            "uri: {}",
            uri
        );
    }
}

// An invalid bearer token is signed-out as far as the gate is concerned.
#[tokio::test]
#[serial]
async fn garbage_tokens_redirect_like_signed_out() {
    let jwks = MockServer::start().await;
    let app = test_app(&jwks).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/jobs")
                .header("Authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/?sign-in=true");
}
