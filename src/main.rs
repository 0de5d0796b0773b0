use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use campus_events::{
    Config, database,
    routes::app,
    services::chat::ChatClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_events=info,tower_http=info".into()),
        )
        .init();

    let config = Config::load()?;

    let pool = database::connect(&config.database).await?;
    tracing::info!("database connected, migrations applied");

    let chat = ChatClient::new(&config.chat);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(pool, Arc::new(config), Arc::new(chat));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "campus events API listening");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
