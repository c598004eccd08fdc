mod desk;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use options_desk::config::Config;

use crate::desk::OptionsDesk;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let shared_config = cfg.shared();

    let mut desk = OptionsDesk::new(shared_config).await;
    desk.run().await?;

    Ok(())
}
