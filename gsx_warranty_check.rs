// Manual check of a warranty lookup against a GSX endpoint
// Run with: CONFIG_PATH=config/gsx.yaml cargo run --bin gsx_warranty_check -- C02ABCD1234

use anyhow::{Context, Result};
use gsx::{ClientConfig, GsxClient, WarrantyQuery};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gsx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let serial_number = std::env::args()
        .nth(1)
        .context("usage: gsx_warranty_check <serial number>")?;

    let config_path = std::env::var("CONFIG_PATH").ok().map(PathBuf::from);
    let config = ClientConfig::load(config_path.as_deref())
        .context("Failed to load GSX configuration")?;

    let mut client = GsxClient::new(config).context("Invalid GSX configuration")?;
    tracing::info!("Using GSX endpoint {}", client.endpoint_url());

    println!("\n=== Authenticate ===");
    let session_id = client.authenticate().await.context("Authentication failed")?;
    println!("Session: {}", session_id);

    println!("\n=== WarrantyStatus ({}) ===", serial_number);
    match client.warranty_status(&WarrantyQuery::new(serial_number)).await {
        Ok(output) => println!("{:#?}", output),
        Err(e) => eprintln!("WarrantyStatus Error: {}", e),
    }

    println!("\n=== Logout ===");
    let logged_out = client.logout().await.context("Logout failed")?;
    println!("Logged out: {}", logged_out);

    Ok(())
}
