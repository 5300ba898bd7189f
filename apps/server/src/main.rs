use anyhow::Context;
use tracing_subscriber::EnvFilter;

use inkpress_core::AppConfig;
use inkpress_http::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr();

    let pool = inkpress_store::connect(&config.database_url)
        .await
        .context("opening database")?;

    let app = router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "inkpress listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
