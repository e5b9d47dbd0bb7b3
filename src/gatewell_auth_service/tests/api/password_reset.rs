use crate::helpers::{TestApp, TestSettings, json_body};

#[tokio::test]
async fn known_and_unknown_emails_get_byte_identical_responses() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    let known = app.forgot_password("a@x.com").await;
    let unknown = app.forgot_password("nobody@x.com").await;

    assert_eq!(known.status(), 200);
    assert_eq!(unknown.status(), 200);

    let known_body = known.bytes().await.unwrap();
    let unknown_body = unknown.bytes().await.unwrap();
    assert_eq!(
        known_body, unknown_body,
        "responses must not reveal whether the email is registered"
    );

    // Only the known address produced an email
    assert_eq!(app.email_client.sent().await.len(), 1);
}

#[tokio::test]
async fn unparseable_email_gets_the_same_response_too() {
    let app = TestApp::spawn().await;

    let garbled = app.forgot_password("not-an-email").await;
    let unknown = app.forgot_password("nobody@x.com").await;

    assert_eq!(garbled.status(), 200);
    let garbled_body = garbled.bytes().await.unwrap();
    let unknown_body = unknown.bytes().await.unwrap();
    assert_eq!(garbled_body, unknown_body);

    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn reset_email_goes_to_the_principal_with_a_usable_link() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    app.forgot_password("a@x.com").await;

    let email = app.email_client.last_sent().await.unwrap();
    assert_eq!(email.recipient, "a@x.com");
    assert_eq!(email.display_name, "Ada");
    assert!(email.reset_url.contains("token="));
}

#[tokio::test]
async fn full_reset_scenario() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    // forgot-password -> token T delivered
    assert_eq!(app.forgot_password("a@x.com").await.status(), 200);
    let token = app.mailed_reset_token().await;

    // wrong token T' -> 400
    let response = app.reset_password("definitely-not-the-token", "pw-fresh-1").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "invalid_or_expired_token");

    // reset with T -> 200
    let response = app.reset_password(&token, "pw-fresh-1").await;
    assert_eq!(response.status(), 200);

    // replay with T -> 400
    let response = app.reset_password(&token, "pw-fresh-2").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "invalid_or_expired_token");

    // old password is gone, new one works
    assert_eq!(app.login_user("a@x.com", "pw123456").await.status(), 401);
    assert_eq!(app.login_user("a@x.com", "pw-fresh-1").await.status(), 200);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::spawn_with(TestSettings {
        reset_token_ttl_seconds: 1,
        ..Default::default()
    })
    .await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    app.forgot_password("a@x.com").await;
    let token = app.mailed_reset_token().await;

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    let response = app.reset_password(&token, "pw-fresh-1").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "invalid_or_expired_token");

    // The old credential is untouched
    assert_eq!(app.login_user("a@x.com", "pw123456").await.status(), 200);
}

#[tokio::test]
async fn newer_request_invalidates_the_earlier_token() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    app.forgot_password("a@x.com").await;
    let first = app.mailed_reset_token().await;

    app.forgot_password("a@x.com").await;
    let second = app.mailed_reset_token().await;
    assert_ne!(first, second);

    // Last writer wins: the superseded token no longer matches
    assert_eq!(app.reset_password(&first, "pw-fresh-1").await.status(), 400);
    assert_eq!(app.reset_password(&second, "pw-fresh-1").await.status(), 200);
}

#[tokio::test]
async fn new_password_is_held_to_the_signup_policy() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    app.forgot_password("a@x.com").await;
    let token = app.mailed_reset_token().await;

    let response = app.reset_password(&token, "short").await;
    assert_eq!(response.status(), 400);
    assert_eq!(json_body(response).await["kind"], "validation_error");

    // The rejected attempt did not consume the token
    assert_eq!(app.reset_password(&token, "pw-fresh-1").await.status(), 200);
}
