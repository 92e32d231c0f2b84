use fintro_assistant::{api::start_server, config::AppConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("Fintro Assistant - API Server");
    info!("Port: {}", config.api_port);

    let resolver = Arc::new(config.load_resolver()?);
    let engine = Arc::new(config.load_engine()?);

    start_server(resolver, engine, config.api_port).await?;

    Ok(())
}
