use std::sync::Arc;
use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use common::config::NeuroWatchConfig;
use predict_server::server;
use risk_scorer::RiskScorer;

#[tokio::main]
async fn main() -> Result<()> {
    // 第一个参数为配置文件路径（可选）
    let config_arg = std::env::args().nth(1);
    let (config, source) = NeuroWatchConfig::resolve(config_arg.as_deref())?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)))
        .init();

    match source {
        Some(path) => info!("Loaded config from {:?}", path),
        None => info!("No config file found, using defaults"),
    }

    info!("NeuroWatch backend starting...");

    let scorer = Arc::new(RiskScorer::new());

    if let Err(e) = server::run(&config, scorer).await {
        error!("NeuroWatch backend error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
