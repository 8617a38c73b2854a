//! Resonator CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resonator::cli::{Cli, Commands};
use resonator::domain::models::LoggingConfig;
use resonator::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Tracing is initialized from the logging section of the project config;
    // RUST_LOG still takes precedence when set.
    let logging = ConfigLoader::load()
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    let result = match cli.command {
        Commands::Run(args) => resonator::cli::commands::run::execute(args, cli.json).await,
        Commands::Pool(args) => resonator::cli::commands::pool::execute(args, cli.json),
    };

    if let Err(err) = result {
        resonator::cli::handle_error(err, cli.json);
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
