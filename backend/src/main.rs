use anyhow::Context;
use backend::{db, static_files, AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Set up tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    if !static_files::assets_embedded() {
        tracing::warn!("Dashboard page missing from the binary; only the JSON API is served");
    }

    let pool = db::build_pool(&config.database_url, config.pool_size)
        .context("Failed to create connection pool")?;

    db::initialize(&pool, config.seed_database)
        .await
        .with_context(|| format!("Failed to initialize database {}", config.database_url))?;

    let addr = config.listen_addr();
    let app = backend::router(AppState { pool });

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
