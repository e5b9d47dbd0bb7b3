use gatewell_adapters::{Argon2PasswordHasher, InMemoryPrincipalStore, JwtConfig, MockEmailClient};
use gatewell_auth_service::AuthService;
use gatewell_axum::ServiceConfig;
use secrecy::Secret;
use serde_json::{Value, json};

pub const ADMIN_SECRET: &str = "provisioning-secret";

/// Knobs a test can turn without rebuilding the whole config.
pub struct TestSettings {
    pub reset_token_ttl_seconds: i64,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_seconds: u64,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            reset_token_ttl_seconds: 3600,
            rate_limit_max_requests: 3,
            rate_limit_window_seconds: 900,
        }
    }
}

/// A running service on an ephemeral port, with direct handles to the
/// in-memory store (for administrative actions tests need) and the mock
/// mailbox (to fish out reset tokens).
pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: MockEmailClient,
    pub principal_store: InMemoryPrincipalStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(TestSettings::default()).await
    }

    pub async fn spawn_with(settings: TestSettings) -> Self {
        let principal_store = InMemoryPrincipalStore::new();
        let email_client = MockEmailClient::new();

        let config = ServiceConfig {
            jwt: JwtConfig {
                jwt_secret: Secret::from("test-jwt-secret".to_owned()),
                token_ttl_in_seconds: 600,
            },
            admin_signup_secret: Some(Secret::from(ADMIN_SECRET.to_owned())),
            reset_url_base: "http://localhost:3000/reset-password".to_owned(),
            reset_token_ttl_seconds: settings.reset_token_ttl_seconds,
            rate_limit_max_requests: settings.rate_limit_max_requests,
            rate_limit_window_seconds: settings.rate_limit_window_seconds,
            trust_proxy: false,
        };

        let service = AuthService::new(
            principal_store.clone(),
            Argon2PasswordHasher::new(),
            email_client.clone(),
            config,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
            principal_store,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn signup_user(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/auth/user/signup",
            &json!({"name": name, "email": email, "password": password}),
        )
        .await
    }

    pub async fn signup_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        admin_secret: &str,
    ) -> reqwest::Response {
        self.post_json(
            "/auth/admin/signup",
            &json!({
                "name": name,
                "email": email,
                "password": password,
                "adminSecret": admin_secret
            }),
        )
        .await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/auth/user/login",
            &json!({"email": email, "password": password}),
        )
        .await
    }

    pub async fn login_admin(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/auth/admin/login",
            &json!({"email": email, "password": password}),
        )
        .await
    }

    pub async fn validate_session(&self, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/auth/validate-session", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn logout(&self, token: Option<&str>) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/auth/logout", self.address));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("request failed")
    }

    pub async fn forgot_password(&self, email: &str) -> reqwest::Response {
        self.post_json("/auth/forgot-password", &json!({"email": email})).await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> reqwest::Response {
        self.post_json(
            "/auth/reset-password",
            &json!({"token": token, "password": password}),
        )
        .await
    }

    /// The reset token from the most recently "delivered" email.
    pub async fn mailed_reset_token(&self) -> String {
        self.email_client
            .last_sent()
            .await
            .expect("no reset email was captured")
            .reset_token()
            .expect("captured email carried no token")
    }
}

pub async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.expect("body was not valid JSON")
}

pub async fn token_from(response: reqwest::Response) -> String {
    json_body(response).await["token"]
        .as_str()
        .expect("response carried no token")
        .to_owned()
}
