use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bbb_admin::{
    api::{create_router, AppState},
    config::Config,
    db,
    error::AppError,
    session::CookieStore,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bbb_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting bbb-admin v{}...", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Configuration loaded");

    // Fails fast if the database is unreachable
    let pool = db::connect(&config).await.inspect_err(|e| {
        tracing::error!("❌ Failed to connect to database: {}", e);
    })?;

    let state = AppState {
        db: pool,
        sessions: Arc::new(CookieStore::new(&config.session_secret)),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.server_address();
    tracing::info!("🌐 Server running at http://{}", addr);
    tracing::info!("  GET/POST /register");
    tracing::info!("  GET/POST /login");
    tracing::info!("  GET      /logout");
    tracing::info!("  GET      /admin (admin session required)");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
