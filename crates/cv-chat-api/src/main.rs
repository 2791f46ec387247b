//! Conversofy Chat API — chat, webhook, theme and contact endpoints.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cv_chat_api::config::ApiConfig;
use cv_chat_api::routes::build_router;
use cv_chat_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cv-chat-api starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CONVERSOFY_CONFIG").ok());
    let config = ApiConfig::load(config_path.as_deref())?;
    tracing::info!(
        config_path = config_path.as_deref().unwrap_or("-"),
        theme_path = %config.theme_path.display(),
        "config loaded"
    );

    let state = AppState::from_config(&config);
    let app = build_router(state, &config.cors_origins);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    tracing::info!("cv-chat-api stopped");
    Ok(())
}
