use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use taskpad::auth::AuthMiddleware;
use taskpad::cache::{Cache, RedisCache};
use taskpad::config::Config;
use taskpad::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // The cache must be reachable at startup; once running, cache outages
    // degrade reads to the store instead of failing requests.
    let cache: Arc<dyn Cache> = Arc::new(
        RedisCache::connect(&config.redis_url)
            .await
            .expect("Failed to connect to Redis"),
    );
    let cache_data: web::Data<dyn Cache> = web::Data::from(cache);

    log::info!("Starting TaskPad server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(cache_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:5173")
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
