use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use transport::config::AppConfig;
use transport::error::AppError;
use transport::routes::create_router;
use transport::state::AppState;
use transport::store::{seed, InMemoryStore, Repository};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn Repository> = Arc::new(InMemoryStore::new());
    if config.seed_demo_data {
        seed::load_demo_data(store.as_ref());
        info!("loaded demo users and destinations");
    }

    let state = AppState::new(&config, store);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(
        policy = ?config.driver_status_policy,
        "listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app.into_make_service())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,transport=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
