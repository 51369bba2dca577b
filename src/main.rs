use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;

use quadro::auth::TokenService;
use quadro::config::Config;
use quadro::error::AppError;
use quadro::routes;
use quadro::store::{MemoryStore, PgStore, Store};

/// Logs a startup failure and turns it into the error `main` exits with.
fn fatal(error: AppError) -> io::Error {
    log::error!("Startup failed: {}", error);
    io::Error::new(io::ErrorKind::Other, error)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(fatal)?;
    let tokens = TokenService::new(&config.jwt_secret).map_err(fatal)?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(
            PgStore::connect(url, config.database_max_connections)
                .await
                .map_err(fatal)?,
        ),
        None => {
            log::warn!("DATABASE_URL is not set; using the in-memory store (data is lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    let store = web::Data::from(store);
    let tokens = web::Data::new(tokens);

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
