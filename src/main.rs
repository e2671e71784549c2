use anyhow::Result;
use clap::Parser;
use smartlearn_rs::cli;
use smartlearn_rs::launch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let command = args.command.clone();
    let config = args.into_config()?;

    // 日志写到stderr，stdout只留给JSON结果
    let default_filter = if config.verbose {
        "smartlearn_rs=debug,smartlearn=debug"
    } else {
        "smartlearn_rs=info,smartlearn=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    launch(&config, &command).await
}
