mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;
use crate::commands::CommandExecutor;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    dotenvy::dotenv().ok();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "eventos_client=debug,eventos_cli=debug"
    } else {
        "eventos_client=warn,eventos_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let executor = CommandExecutor::new(&args).await?;
    executor.run(args.command).await
}
