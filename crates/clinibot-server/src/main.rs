use std::time::Duration;

use jiff::Timestamp;
use tracing_subscriber::EnvFilter;

use clinibot_server::config::Settings;
use clinibot_server::state::AppState;
use clinibot_server::{app, secrets};

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let settings = Settings::from_env();
    let secrets = secrets::load_secrets(&settings.secrets_path);

    if secrets.api_key.is_none() {
        tracing::warn!("no provider API key configured; case generation will be refused");
    }
    if secrets.webhook_url.is_none() {
        tracing::warn!("no webhook URL configured; registrations will be refused");
    }

    let state = AppState::new(&settings, secrets)?;

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.sweep_idle(Timestamp::now()).await;
        }
    });

    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    tracing::info!(addr = %settings.bind, "clinibot listening");

    axum::serve(listener, app).await?;
    Ok(())
}
