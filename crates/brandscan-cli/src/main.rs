mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use brandscan_extract::ExtractionMode;

#[derive(Debug, Parser)]
#[command(name = "brandscan")]
#[command(about = "Extract brand intelligence, guides and profiles from a homepage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print structured brand intelligence as JSON
    Extract {
        url: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Model)]
        strategy: StrategyArg,
    },
    /// Write a Markdown brand guide
    Guide {
        url: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
        /// Write the guide to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the flat brand profile as JSON
    Profile { url: String },
    /// Print the brand guide and profile together as JSON
    Report {
        url: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Fetch the page here and send its text to the model
    Server,
    /// Let the model fetch the page, with retry and server fallback
    Model,
    /// Server fetch first, then the model strategy
    Auto,
}

impl From<StrategyArg> for ExtractionMode {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Server => Self::Server,
            StrategyArg::Model => Self::Model,
            StrategyArg::Auto => Self::Auto,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = brandscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract { url, strategy } => {
            commands::run_extract(&config, &url, strategy.into()).await
        }
        Commands::Guide {
            url,
            strategy,
            output,
        } => commands::run_guide(&config, &url, strategy.into(), output.as_deref()).await,
        Commands::Profile { url } => commands::run_profile(&config, &url).await,
        Commands::Report { url, strategy } => {
            commands::run_report(&config, &url, strategy.into()).await
        }
    }
}
