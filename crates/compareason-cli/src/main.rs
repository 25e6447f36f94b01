mod commands;

use clap::{Parser, Subcommand};
use compareason_compare::{Comparator, SourceRegistry, DEFAULT_SEARCH_SOURCE};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "compareason-cli")]
#[command(about = "Compare product prices across shopping sites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a single source
    Search {
        query: String,
        #[arg(long, default_value = DEFAULT_SEARCH_SOURCE)]
        source: String,
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Search several sources concurrently and rank the results
    Compare {
        query: String,
        /// Comma-separated source ids; every registered source when omitted
        #[arg(long, value_delimiter = ',')]
        sources: Option<Vec<String>>,
        #[arg(long)]
        max_results_per_source: Option<usize>,
    },
    /// Probe every source with a trivial query
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = compareason_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let comparator = Comparator::new(SourceRegistry::from_config(&config)?);

    let output = match cli.command {
        Commands::Search {
            query,
            source,
            max_results,
        } => {
            let limit = commands::clamp_limit(
                max_results,
                config.default_max_results,
                config.max_results_cap,
            );
            commands::run_search(&comparator, &source, &query, limit).await?
        }
        Commands::Compare {
            query,
            sources,
            max_results_per_source,
        } => {
            let limit = commands::clamp_limit(
                max_results_per_source,
                config.default_max_results_per_source,
                config.max_results_cap,
            );
            commands::run_compare(&comparator, &query, limit, sources.as_deref()).await?
        }
        Commands::Status => commands::run_status(&comparator).await?,
    };

    println!("{output}");
    Ok(())
}
