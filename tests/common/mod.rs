use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actix_cors::Cors;
use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use taskpad::auth::AuthMiddleware;
use taskpad::cache::{Cache, CacheError};
use taskpad::routes;
use taskpad::routes::health;

/// In-memory `Cache` so the integration suite needs Postgres but not Redis.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Arc<dyn Cache> {
        Arc::new(MemoryCache {
            entries: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub async fn connect_pool() -> PgPool {
    dotenv::dotenv().ok();
    std::env::set_var("JWT_SECRET", "integration_test_secret");
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

/// Builds the application the same way `main.rs` does.
pub async fn init_app(
    pool: PgPool,
    cache: Arc<dyn Cache>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let cache_data: web::Data<dyn Cache> = web::Data::from(cache);
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(cache_data)
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:5173")
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

/// Registers a fresh user with a unique email and logs in, returning the
/// session cookie and the new user's id.
pub async fn signup<S, B>(app: &S, name: &str) -> (Cookie<'static>, Uuid)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let email = format!(
        "{}+{}@example.com",
        name.to_lowercase().replace(' ', "."),
        Uuid::new_v4().simple()
    );

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": "Password123!",
            "phone": "0501234567"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id: Uuid = serde_json::from_value(body["id"].clone()).expect("register returns the id");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("login response must set the token cookie")
        .into_owned();

    (cookie, id)
}
