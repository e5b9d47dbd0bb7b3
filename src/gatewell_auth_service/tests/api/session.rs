use crate::helpers::{TestApp, json_body, token_from};

#[tokio::test]
async fn full_session_lifecycle() {
    let app = TestApp::spawn().await;

    // signup -> 201 with token
    let response = app.signup_user("Ada", "a@x.com", "pw123456").await;
    assert_eq!(response.status(), 201);

    // login -> 200 with token
    let response = app.login_user("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 200);
    let token = token_from(response).await;

    // validate-session -> 200, same email
    let response = app.validate_session(&token).await;
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["user"]["email"], "a@x.com");

    // logout -> 200
    let response = app.logout(Some(&token)).await;
    assert_eq!(response.status(), 200);

    // The unexpired token still validates after logout: sessions are
    // stateless and carry no server-side revocation.
    let response = app.validate_session(&token).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app.validate_session("not-a-jwt").await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "invalid_token");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app
        .http_client
        .get(format!("{}/auth/validate-session", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    use gatewell_adapters::JwtConfig;
    use gatewell_adapters::authentication::jwt_session::generate_session_token;
    use gatewell_core::{Email, Principal, Role};
    use secrecy::Secret;

    let app = TestApp::spawn().await;

    // Well-formed claims, wrong signing key
    let principal = Principal::new(
        "Eve".to_owned(),
        Email::try_from(Secret::from("e@x.com".to_owned())).unwrap(),
        Secret::from("$argon2id$hash".to_owned()),
        Role::User,
    );
    let foreign_config = JwtConfig {
        jwt_secret: Secret::from("some-other-secret".to_owned()),
        token_ttl_in_seconds: 600,
    };
    let foreign_token = generate_session_token(&principal, &foreign_config).unwrap();

    let response = app.validate_session(&foreign_token).await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "invalid_token");
}

#[tokio::test]
async fn validation_reflects_live_state_not_claims() {
    let app = TestApp::spawn().await;
    let body = json_body(app.signup_user("Ada", "a@x.com", "pw123456").await).await;
    let token = body["token"].as_str().unwrap().to_owned();
    let id = body["user"]["id"].as_str().unwrap().parse().unwrap();

    assert_eq!(app.validate_session(&token).await.status(), 200);

    // Deactivation cuts off the session on the very next validation,
    // even though the token itself is still cryptographically valid.
    app.principal_store.deactivate(&id).await.unwrap();
    let response = app.validate_session(&token).await;
    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await["kind"], "user_inactive");
}

#[tokio::test]
async fn logout_is_advisory_and_never_fails() {
    let app = TestApp::spawn().await;

    assert_eq!(app.logout(None).await.status(), 200);
    assert_eq!(app.logout(Some("garbage-token")).await.status(), 200);

    let token = token_from(app.signup_user("Ada", "a@x.com", "pw123456").await).await;
    assert_eq!(app.logout(Some(&token)).await.status(), 200);
}
