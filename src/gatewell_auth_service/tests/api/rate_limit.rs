use crate::helpers::{TestApp, TestSettings, json_body};

#[tokio::test]
async fn fourth_request_in_window_is_rejected() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    for _ in 0..3 {
        assert_eq!(app.forgot_password("a@x.com").await.status(), 200);
    }

    let response = app.forgot_password("a@x.com").await;
    assert_eq!(response.status(), 429);
    assert!(response.headers().get("retry-after").is_some());
    assert_eq!(json_body(response).await["kind"], "rate_limit_exceeded");
}

#[tokio::test]
async fn limit_counts_requests_not_matches() {
    // Unknown emails burn quota too; otherwise the limiter itself would
    // leak which addresses exist.
    let app = TestApp::spawn().await;

    for _ in 0..3 {
        assert_eq!(app.forgot_password("nobody@x.com").await.status(), 200);
    }
    assert_eq!(app.forgot_password("nobody@x.com").await.status(), 429);
}

#[tokio::test]
async fn window_expiry_readmits_the_origin() {
    let app = TestApp::spawn_with(TestSettings {
        rate_limit_window_seconds: 1,
        ..Default::default()
    })
    .await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    for _ in 0..3 {
        assert_eq!(app.forgot_password("a@x.com").await.status(), 200);
    }
    assert_eq!(app.forgot_password("a@x.com").await.status(), 429);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    assert_eq!(app.forgot_password("a@x.com").await.status(), 200);
}

#[tokio::test]
async fn other_endpoints_are_not_rate_limited() {
    let app = TestApp::spawn().await;
    app.signup_user("Ada", "a@x.com", "pw123456").await;

    // Exhaust the forgot-password window...
    for _ in 0..4 {
        app.forgot_password("a@x.com").await;
    }

    // ...login and session validation are unaffected
    let response = app.login_user("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 200);
}
