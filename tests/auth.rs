// Integration tests require a running Postgres (DATABASE_URL); run with
// `cargo test -- --ignored` against a migrated test database.

mod common;

use actix_web::test;
use serde_json::json;
use uuid::Uuid;

use common::{connect_pool, init_app, MemoryCache};

fn unique_email(tag: &str) -> String {
    format!("{}+{}@example.com", tag, Uuid::new_v4().simple())
}

#[ignore]
#[actix_rt::test]
async fn test_register_and_login_flow() {
    let pool = connect_pool().await;
    let app = init_app(pool.clone(), MemoryCache::new()).await;
    let email = unique_email("integration");

    // Register a new user
    let register_payload = json!({
        "name": "Integration User",
        "email": email,
        "password": "Password123!",
        "phone": "0501234567"
    });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );
    let register_body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(register_body["message"], "User registered successfully");
    assert!(register_body["id"].is_string());

    // Try to register the same user again (should fail)
    let req_conflict = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    let status_conflict = resp_conflict.status();
    let body_conflict = test::read_body(resp_conflict).await;
    assert_eq!(
        status_conflict,
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate registration did not fail as expected. Body: {:?}",
        String::from_utf8_lossy(&body_conflict)
    );
    let conflict_body: serde_json::Value = serde_json::from_slice(&body_conflict).unwrap();
    assert_eq!(conflict_body["message"], "Email already exist");

    // Login with a wrong password yields 401
    let req_bad_password = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": "WrongPassword1" }))
        .to_request();
    let resp_bad_password = test::call_service(&app, req_bad_password).await;
    assert_eq!(
        resp_bad_password.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );

    // Login with an unknown email yields 404
    let req_unknown = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": unique_email("nobody"),
            "password": "Password123!"
        }))
        .to_request();
    let resp_unknown = test::call_service(&app, req_unknown).await;
    assert_eq!(
        resp_unknown.status(),
        actix_web::http::StatusCode::NOT_FOUND
    );

    // Login with the registered user sets the httpOnly session cookie
    let req_login = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": "Password123!" }))
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);

    let session = resp_login
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("login response must set the token cookie")
        .into_owned();
    assert_eq!(session.http_only(), Some(true));
    assert!(!session.value().is_empty());

    // The cookie authenticates /auth/profile; the body is the decoded principal
    let req_profile = test::TestRequest::get()
        .uri("/auth/profile")
        .cookie(session.clone())
        .to_request();
    let resp_profile = test::call_service(&app, req_profile).await;
    assert_eq!(resp_profile.status(), actix_web::http::StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp_profile).await;
    assert_eq!(profile["user"]["email"], email.as_str());
    assert_eq!(profile["user"]["name"], "Integration User");
    assert_eq!(profile["user"]["phone"], "0501234567");

    // Logout clears the cookie
    let req_logout = test::TestRequest::post()
        .uri("/auth/logout")
        .cookie(session)
        .to_request();
    let resp_logout = test::call_service(&app, req_logout).await;
    assert_eq!(resp_logout.status(), actix_web::http::StatusCode::OK);
    let cleared = resp_logout
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("logout response must reset the token cookie")
        .into_owned();
    assert!(cleared.value().is_empty());
}

#[ignore]
#[actix_rt::test]
async fn test_protected_routes_require_token() {
    let pool = connect_pool().await;
    let app = init_app(pool, MemoryCache::new()).await;

    for uri in ["/auth/profile", "/tasks", "/lists"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::try_call_service(&app, req).await;
        match resp {
            Ok(resp) => assert_eq!(
                resp.status(),
                actix_web::http::StatusCode::UNAUTHORIZED,
                "{} should be protected",
                uri
            ),
            Err(err) => assert_eq!(
                err.error_response().status(),
                actix_web::http::StatusCode::UNAUTHORIZED,
                "{} should be protected",
                uri
            ),
        }
    }
}

#[ignore]
#[actix_rt::test]
async fn test_register_validation_reports_fields() {
    let pool = connect_pool().await;
    let app = init_app(pool, MemoryCache::new()).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Al",
            "email": "not-an-email",
            "password": "123",
            "phone": "abc"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["email"].is_string());
    assert!(body["errors"]["password"].is_string());
    assert!(body["errors"]["phone"].is_string());
}
