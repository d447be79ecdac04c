use anyhow::Context;
use secrecy::ExposeSecret;

use logihub_api::config::{AppConfig, DEV_SESSION_SECRET};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("failed to load configuration")?;
    logihub_observability::init(&config.telemetry.log_level, config.telemetry.log_format);

    if config.session.secret.expose_secret() == DEV_SESSION_SECRET {
        tracing::warn!("session.secret not set; using insecure dev default");
    }
    if config.assistant.api_key.is_none() {
        tracing::warn!("no assistant API key; the widget answers from built-in rules");
    }

    let app = logihub_api::app::build_app(&config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
