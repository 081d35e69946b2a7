//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_success() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@x.com",
                "firstName": "Ana",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let user = &response.body["user"];
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["firstName"], "Ana");
    assert_eq!(user["lastName"], "Ruiz");
    assert!(user.get("id").is_some());
    // The credential hash must never leave the server.
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@x.com",
                "firstName": "Ana",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "A@X.COM",
                "firstName": "Ana",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let app = helpers::TestApp::new();

    for password in ["short1A", "abcdefg1", "ABCDEFG1", "Abcdefgh"] {
        let response = app
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": "weak@x.com",
                    "firstName": "Ana",
                    "lastName": "Ruiz",
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "Password {:?} should be rejected",
            password
        );
    }
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@x.com",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_non_json_body_is_bad_request() {
    let app = helpers::TestApp::new();

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("not json"))
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_invalid_email_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "firstName": "Ana",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body.get("token").is_some());
    assert_eq!(response.body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "Wrongpass1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "Wrongpass1",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@x.com",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn test_profile_authenticated() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;
    let token = app.login("a@x.com", "Abcdefg1").await;

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "a@x.com");
    assert_eq!(response.body["user"]["firstName"], "Ana");
}

#[tokio::test]
async fn test_profile_unauthenticated() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/auth/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_truncated_token() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;
    let token = app.login("a@x.com", "Abcdefg1").await;

    let truncated = &token[..token.len() - 10];
    let response = app
        .request("GET", "/api/auth/profile", None, Some(truncated))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_malformed_authorization_header() {
    let app = helpers::TestApp::new();

    // No "Bearer " prefix.
    let body_str = String::new();
    let req = http::Request::builder()
        .method("GET")
        .uri("/api/auth/profile")
        .header("Authorization", "Token abc.def.ghi")
        .body(axum::body::Body::from(body_str))
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_returns_ok() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;
    let token = app.login("a@x.com", "Abcdefg1").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    // Tokens are stateless, so the token stays valid until expiry.
    let after = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = helpers::TestApp::new();
    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;
    let identity_id = login.body["user"]["id"]
        .as_str()
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
        .expect("No user id in login response");

    // Craft a token that expired one second ago with the same secret.
    let now = chrono::Utc::now().timestamp();
    let claims = authgate_auth::jwt::Claims {
        sub: identity_id,
        iat: now - 7200,
        exp: now - 1,
    };
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(app.config.auth.jwt_secret.as_bytes()),
    )
    .expect("Failed to encode token");

    let response = app
        .request("GET", "/api/auth/profile", None, Some(&expired))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}

/// Full lifecycle: register, conflict on re-register, wrong then right
/// password, authorized profile fetch, truncated token rejected.
#[tokio::test]
async fn test_full_auth_lifecycle() {
    let app = helpers::TestApp::new();

    app.register_identity("a@x.com", "Ana", "Ruiz", "Abcdefg1")
        .await;

    let conflict = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@x.com",
                "firstName": "Ana",
                "lastName": "Ruiz",
                "password": "Abcdefg1",
            })),
            None,
        )
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);

    let bad_login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "Abcdefg2",
            })),
            None,
        )
        .await;
    assert_eq!(bad_login.status, StatusCode::UNAUTHORIZED);

    let token = app.login("a@x.com", "Abcdefg1").await;

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["user"]["email"], "a@x.com");

    let truncated = &token[..token.len() - 10];
    let rejected = app
        .request("GET", "/api/auth/profile", None, Some(truncated))
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
}
