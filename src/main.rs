use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contacts_api::{
    app, config::Config, db, services::auth::cleanup_expired_sessions, state::AppState,
    store::PgStore, token::maker_from_config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let tokens = maker_from_config(&config)?;
    tracing::info!("✅ Token maker ready: {:?}", config.token_kind);

    let pool = db::create_pool(&config.database_url)?;
    if let Err(e) = db::apply_schema(&pool).await {
        tracing::error!("❌ Failed to apply schema: {}", e);
        return Err(e.into());
    }
    tracing::info!("✅ Database schema is up to date");

    let store = PgStore::new(pool);
    let cleanup_interval = config.session_cleanup_interval;
    let server_address = config.server_address.clone();
    let state = AppState::new(store.clone(), tokens, config);

    let app = app::router(state);

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(cleanup_interval).await;
            tracing::info!("🧹 Running scheduled cleanup of expired sessions...");
            match cleanup_expired_sessions(&store).await {
                Ok(removed) => {
                    tracing::info!("✅ Cleanup job completed: {} sessions removed", removed);
                }
                Err(e) => {
                    tracing::error!("❌ Cleanup job failed: {}", e);
                }
            }
        }
    });

    let listener = TcpListener::bind(&server_address).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
