use anyhow::Result;
use clap::Parser;
use studysheet_composer::{cli, server::launch};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let config = args.into_config()?;

    launch(&config).await
}

/// 初始化日志，RUST_LOG优先，其次由--verbose决定默认级别
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "studysheet_composer={},tower_http={}",
            default_level, default_level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
