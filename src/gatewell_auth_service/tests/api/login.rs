use crate::helpers::{ADMIN_SECRET, TestApp, json_body};

#[tokio::test]
async fn login_returns_token_and_updated_bookkeeping() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    let response = app.login_user("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 200);

    let body = json_body(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["loginCount"], 1);
    assert!(body["user"]["lastLogin"].as_str().is_some());

    // Counter keeps climbing on subsequent logins
    let body = json_body(app.login_user("a@x.com", "pw123456").await).await;
    assert_eq!(body["user"]["loginCount"], 2);
}

#[tokio::test]
async fn login_normalizes_email_like_signup() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    let response = app.login_user("  A@X.com ", "pw123456").await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    let response = app.login_user("a@x.com", "wrong-password").await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "invalid_credentials");
}

#[tokio::test]
async fn wrong_entry_point_fails_exactly_like_unknown_email() {
    let app = TestApp::spawn().await;
    app.signup_admin("Admin", "admin@x.com", "pw123456", ADMIN_SECRET)
        .await;

    // Correct admin credentials on the USER entry point...
    let wrong_role = app.login_user("admin@x.com", "pw123456").await;
    // ...versus an email that was never registered
    let unknown = app.login_user("ghost@x.com", "pw123456").await;

    assert_eq!(wrong_role.status(), 401);
    assert_eq!(unknown.status(), 401);

    let wrong_role_body = wrong_role.text().await.unwrap();
    let unknown_body = unknown.text().await.unwrap();
    assert_eq!(
        wrong_role_body, unknown_body,
        "role mismatch must be indistinguishable from an unknown account"
    );
}

#[tokio::test]
async fn user_credentials_cannot_open_an_admin_session() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    let response = app.login_admin("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "invalid_credentials");
}

#[tokio::test]
async fn each_entry_point_authenticates_its_own_role() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "user@x.com", "pw123456").await;
    app.signup_admin("Admin", "admin@x.com", "pw123456", ADMIN_SECRET)
        .await;

    assert_eq!(app.login_user("user@x.com", "pw123456").await.status(), 200);
    assert_eq!(
        app.login_admin("admin@x.com", "pw123456").await.status(),
        200
    );
}

#[tokio::test]
async fn deactivated_account_is_forbidden() {
    let app = TestApp::spawn().await;
    let body = json_body(app.signup_user("Ada", "a@x.com", "pw123456").await).await;
    let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
    app.principal_store.deactivate(&id).await.unwrap();

    let response = app.login_user("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 403);
    assert_eq!(json_body(response).await["kind"], "account_inactive");
}

#[tokio::test]
async fn deactivated_account_with_wrong_password_reads_as_invalid_credentials() {
    let app = TestApp::spawn().await;
    let body = json_body(app.signup_user("Ada", "a@x.com", "pw123456").await).await;
    let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
    app.principal_store.deactivate(&id).await.unwrap();

    let response = app.login_user("a@x.com", "wrong-password").await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "invalid_credentials");
}
