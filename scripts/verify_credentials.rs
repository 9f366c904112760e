//! Twitter Credential Verification Script
//!
//! Loads the `xapi_*` credentials from the environment and probes
//! `account/verify_credentials.json` with them.

use tweezers::{TweezerAuth, TwitterConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("🔐 Twitter Credential Check");
    println!("===========================");

    let config = TwitterConfig::from_env()?;
    println!("📍 API root: {}", config.base_url);

    let auth = TweezerAuth::new(config).await?;
    println!("📊 {}", auth);

    if auth.is_verified() {
        println!("✅ {}", auth.verify_message());
        Ok(())
    } else {
        println!("❌ {}", auth.verify_message());
        Err(format!("Credential check failed with status {}", auth.status_code()).into())
    }
}
