use actix_files as fs;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tera::Tera;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use yatube::auth::SessionKeys;
use yatube::cache::PageCache;
use yatube::handlers;
use yatube::Config;

/// Liveness probe: answers once the database does.
async fn healthz(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "yatube",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "yatube",
        })),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!("starting yatube ({})", config.app.env);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let redis_client =
        redis::Client::open(config.cache.url.clone()).context("invalid REDIS_URL")?;
    let redis_manager = ConnectionManager::new(redis_client)
        .await
        .context("failed to connect to Redis")?;
    let page_cache = PageCache::new(redis_manager, config.cache.index_ttl_secs);

    let session_keys = SessionKeys::new(&config.auth);

    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .context("failed to load templates")?;

    let bind_addr = (config.app.host.clone(), config.app.port);
    info!("listening on {}:{}", bind_addr.0, bind_addr.1);

    let pool_data = web::Data::new(pool);
    let cache_data = web::Data::new(page_cache);
    let keys_data = web::Data::new(session_keys);
    let tmpl_data = web::Data::new(templates);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(cache_data.clone())
            .app_data(keys_data.clone())
            .app_data(tmpl_data.clone())
            .wrap(TracingLogger::default())
            .route("/healthz", web::get().to(healthz))
            .service(fs::Files::new("/static", "./static"))
            .service(fs::Files::new("/media", "./media"))
            .configure(handlers::init_routes)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
