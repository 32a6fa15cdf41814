use tracing_subscriber::{EnvFilter, fmt};

use tts_proxy::{config, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Settings::load()?;

    // Use configured host/port to bind the server
    let addr = config.bind_addr();
    let app = server::create_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Proxy server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
