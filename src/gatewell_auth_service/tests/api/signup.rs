use crate::helpers::{ADMIN_SECRET, TestApp, json_body, token_from};

#[tokio::test]
async fn user_signup_returns_created_with_token_and_sanitized_user() {
    let app = TestApp::spawn().await;

    let response = app.signup_user("Ada Client", "a@x.com", "pw123456").await;
    assert_eq!(response.status(), 201);

    let body = json_body(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["loginCount"], 0);
    assert_eq!(body["user"]["isActive"], true);

    // Credential material never appears in a response body
    let raw = body.to_string();
    assert!(!raw.contains("passwordHash"));
    assert!(!raw.contains("password_hash"));
    assert!(!raw.contains("resetToken"));
}

#[tokio::test]
async fn signup_token_is_immediately_valid() {
    let app = TestApp::spawn().await;

    let response = app.signup_user("Ada Client", "a@x.com", "pw123456").await;
    let token = token_from(response).await;

    let response = app.validate_session(&token).await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn duplicate_email_fails_with_email_exists() {
    let app = TestApp::spawn().await;

    assert_eq!(
        app.signup_user("Ada", "a@x.com", "pw123456").await.status(),
        201
    );

    // Different case, same mailbox
    let response = app.signup_user("Ada Again", "A@X.COM", "pw567890").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "email_exists");
}

#[tokio::test]
async fn email_is_unique_across_roles() {
    let app = TestApp::spawn().await;

    assert_eq!(
        app.signup_user("Ada", "shared@x.com", "pw123456")
            .await
            .status(),
        201
    );

    let response = app
        .signup_admin("Admin Ada", "shared@x.com", "pw123456", ADMIN_SECRET)
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "email_exists");
}

#[tokio::test]
async fn admin_signup_with_wrong_secret_is_forbidden_and_writes_nothing() {
    let app = TestApp::spawn().await;

    let response = app
        .signup_admin("Admin", "admin@x.com", "pw123456", "not-the-secret")
        .await;
    assert_eq!(response.status(), 403);
    assert_eq!(json_body(response).await["kind"], "invalid_admin_secret");

    // The rejected attempt left no principal behind
    let response = app
        .signup_admin("Admin", "admin@x.com", "pw123456", ADMIN_SECRET)
        .await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn admin_signup_issues_admin_session() {
    let app = TestApp::spawn().await;

    let response = app
        .signup_admin("Admin", "admin@x.com", "pw123456", ADMIN_SECRET)
        .await;
    assert_eq!(response.status(), 201);

    let body = json_body(response).await;
    assert_eq!(body["user"]["role"], "admin");

    let token = body["token"].as_str().unwrap();
    let response = app.validate_session(token).await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["user"]["role"], "admin");
}

#[tokio::test]
async fn malformed_email_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = app.signup_user("Ada", "not-an-email", "pw123456").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "validation_error");
}

#[tokio::test]
async fn short_password_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = app.signup_user("Ada", "a@x.com", "short1").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "validation_error");
}

#[tokio::test]
async fn blank_name_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = app.signup_user("   ", "a@x.com", "pw123456").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "validation_error");
}
