
use profile_hub::{
    entities::user::{LoginUser, NewUser},
    repositories::user::UserRepository,
};
use reqwest::{header::RETRY_AFTER, StatusCode};
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn seed_user_can_log_in() {
    let app = TestApp::spawn().await;

    let auth = app.login_user(&seed_login()).await;

    assert!(!auth.token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.email, SEED_EMAIL);
}

#[actix_rt::test]
async fn login_response_exposes_underscore_id() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/auth/login"))
        .json(&seed_login())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].is_string());
    assert!(body["user"]["_id"].is_string());
}

#[actix_rt::test]
async fn register_returns_201_for_valid_input() {
    let app = TestApp::spawn().await;
    let user = unique_user();

    let response = app.register_user(&user).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], user.email.as_str());
    assert!(body["_id"].is_string());
    assert!(body.get("passwordHash").is_none());
}

#[actix_rt::test]
async fn duplicate_registration_is_a_conflict() {
    let app = TestApp::spawn().await;
    let user = unique_user();

    app.register_user(&user).await;
    let response = app.register_user(&user).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn weak_password_is_rejected() {
    let app = TestApp::spawn().await;
    let user = NewUser {
        password: "password123".to_string(),
        ..unique_user()
    };

    let response = app.register_user(&user).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "password");
}

#[actix_rt::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/auth/login"))
        .json(&LoginUser {
            email: SEED_EMAIL.to_string(),
            password: "not-the-password".to_string(),
        })
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn protected_endpoints_require_auth() {
    let app = TestApp::spawn().await;

    let response = app.client
        .patch(app.url("/user/availability"))
        .json(&serde_json::json!({"forMentoring": true}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn malformed_bearer_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/user/skills"))
        .bearer_auth("not.a.jwt")
        .json(&serde_json::json!({"name": "Rust"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app.state.auth_handler.user_repo
        .get_user_by_email(SEED_EMAIL)
        .await
        .unwrap()
        .expect("seed user missing");

    // Well past the decoder's default leeway.
    let token = app.token_for(&user, -5);

    let response = app.client
        .get(app.url(&format!("/user/{}/profile", user.id)))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Token has expired");
}

#[actix_rt::test]
async fn login_is_rate_limited_per_client() {
    let app = TestApp::spawn_with(|config| {
        config.login_burst = 2;
        config.login_refill_per_minute = 1;
    })
    .await;

    for _ in 0..2 {
        app.login_user(&seed_login()).await;
    }

    let response = app.client
        .post(app.url("/auth/login"))
        .json(&seed_login())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response.headers()[RETRY_AFTER].to_str().unwrap().parse().unwrap();
    assert!(retry_after >= 1);
}

#[actix_rt::test]
async fn health_is_public() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_rt::test]
async fn trailing_slash_is_normalized() {
    let app = TestApp::spawn().await;

    let response = app.client.get(format!("{}/api/health/", app.address)).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
