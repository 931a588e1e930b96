use actix_web::{web, App, HttpServer};
use pr_reviewer::config::EnvConfig;
use pr_reviewer::db::{DbService, Gateway, InMemoryGateway};
use pr_reviewer::engine::Sampler;
use pr_reviewer::routes::configure_routes;
use pr_reviewer::service::ReviewService;
use std::io;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let addr = format!("0.0.0.0:{}", config.port);

    let gateway: Arc<dyn Gateway> = if config.in_memory_store() {
        info!("Using in-memory store, state is lost on restart");
        Arc::new(InMemoryGateway::new())
    } else {
        let db_service = DbService::new(&config.db_url)
            .await
            .map_err(io::Error::other)?;
        Arc::new(db_service)
    };

    let sampler = Arc::new(match config.rng_seed {
        Some(seed) => {
            info!(seed, "Using fixed sampler seed");
            Sampler::seeded(seed)
        }
        None => Sampler::from_entropy(),
    });
    let service = Arc::new(ReviewService::new(gateway, sampler));

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&service)))
            .configure(configure_routes)
    })
    .shutdown_timeout(10)
    .bind(addr)?
    .run()
    .await
}
