use anyhow::Result;
use tracing::info;

use machine_ui_translator::{config, pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("machine_ui_translator=info".parse()?),
        )
        .init();

    info!("Starting machine UI translation batch");

    let config = config::Config::from_env()?;
    let client = config::http_client()?;

    pipeline::run(&client, &config).await?;

    Ok(())
}
