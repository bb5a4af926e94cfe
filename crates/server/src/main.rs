//! Formcheck Server - HTTP REST API for form template classification
//!
//! This binary serves the classification endpoint plus template
//! management over REST.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
