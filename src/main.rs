use std::process::ExitCode;

use payrelay::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("payrelay=info")),
        )
        .init();

    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "payrelay stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<StatsSnapshot, AppError> {
    let config = AppConfig::from_env()?;
    ServerApp::new(config).run().await
}
