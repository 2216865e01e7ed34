//! MediMate backend service.
//!
//! Serves the liveness endpoint and the command RPC API, seeds the store,
//! and runs one feed ingestion pass in the background when a feed is configured.
//! Default: http://127.0.0.1:9110/

use medimate_backend::routes::{self, AppState};
use medimate_backend::{AppContext, Config, Database, ingest, seed};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::debug!("Loaded config: {:?}", config);
    if config.bot_token.is_none() {
        log::warn!("TELEGRAM_BOT_TOKEN not set; status will report the chat transport as unconfigured");
    }

    log::info!("Opening database at: {}", config.database_url);
    let database = Arc::new(Database::open(&config.database_url).expect("Failed to open database"));

    if config.seed_sample_data {
        match seed::seed_if_empty(&database) {
            Ok((meds, notes)) => log::info!("Seeded {} medications and {} notes", meds, notes),
            Err(e) => log::error!("Failed to seed sample data: {}", e),
        }
    }

    let addr = format!("{}:{}", config.bind_host, config.port);
    let feed_configured = config.feed.url.is_some();
    log::info!(
        "Implicit search {}",
        if config.implicit_search_enabled { "enabled" } else { "disabled" }
    );

    let ctx = Arc::new(AppContext::new(database, config));
    let state = Arc::new(AppState::new(ctx.clone()));

    if feed_configured {
        let ingest_state = state.clone();
        tokio::spawn(async move {
            match ingest::run_feed_pass(ctx).await {
                Ok(report) => ingest_state.record_ingest(report).await,
                Err(e) => log::warn!("[INGEST] Startup feed pass failed: {}", e),
            }
        });
    } else {
        log::info!("MEDIMATE_FEED_URL not set, skipping feed ingestion");
    }

    let app = routes::router(state);

    log::info!("MediMate backend listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
