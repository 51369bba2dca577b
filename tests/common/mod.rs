#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::header, test};
use serde_json::json;

use quadro::auth::AuthResponse;
use quadro::models::PublicUser;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds the full application (health + `/api`) over a fresh in-memory store.
///
/// Expands to `(app, store)` so tests can inspect what was persisted.
macro_rules! init_app {
    () => {{
        let store: std::sync::Arc<dyn quadro::store::Store> =
            std::sync::Arc::new(quadro::store::MemoryStore::new());
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(store.clone()))
                .app_data(actix_web::web::Data::new(
                    quadro::auth::TokenService::new($crate::common::TEST_SECRET).unwrap(),
                ))
                .wrap(actix_web::middleware::Logger::default())
                .service(quadro::routes::health::health)
                .service(actix_web::web::scope("/api").configure(quadro::routes::config)),
        )
        .await;
        (app, store)
    }};
}

pub struct TestUser {
    pub user: PublicUser,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn signup_and_signin(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(&json!({ "email": email, "password": password, "nome": "Test User" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = test::read_body(resp).await;
        return Err(format!(
            "Failed to sign up. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(&json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to sign in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let auth: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse signin response: {}", e))?;
    Ok(TestUser {
        user: auth.user,
        token: auth.token,
    })
}
