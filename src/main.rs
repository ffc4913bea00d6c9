use mock_api::{AppState, ServerConfig, routes};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(&config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, delay_ms = config.items_delay.as_millis(), "mock API listening");
    for endpoint in routes::ENDPOINTS {
        tracing::info!(%endpoint, "endpoint available");
    }

    mock_api::serve(listener, state).await
}
