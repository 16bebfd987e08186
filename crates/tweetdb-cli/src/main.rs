mod db;
mod generate;
mod ingest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tweetdb_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "tweetdb-cli")]
#[command(about = "Generate mock tweets and load them into PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by `generate` and `ingest`.
#[derive(Debug, Clone, clap::Args)]
struct GenerateArgs {
    /// Tweets to generate per company
    #[arg(long, default_value_t = tweetdb_mock::DEFAULT_PER_COMPANY)]
    per_company: usize,
    /// Spread tweets over this many days before now
    #[arg(long, default_value_t = tweetdb_mock::DEFAULT_DAYS)]
    days: u32,
    /// Random seed; the same seed and time produce the same tweets
    #[arg(long, default_value_t = tweetdb_mock::DEFAULT_SEED)]
    seed: u64,
    /// YAML company profiles (defaults to TWEETDB_COMPANIES_PATH, then the built-in set)
    #[arg(long)]
    companies: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write mock tweets to a records file (.json or .csv)
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
        /// Output file; the extension selects JSON or CSV
        #[arg(long, default_value = "mock_tweets.json")]
        output: PathBuf,
    },
    /// Load a records file (.json or .csv) into the tweets table
    Load {
        /// Input file; the extension selects JSON or CSV
        #[arg(long, default_value = "mock_tweets.json")]
        input: PathBuf,
        /// Rows per transaction (defaults to TWEETDB_INGEST_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Generate mock tweets and load them without writing a file
    Ingest {
        #[command(flatten)]
        args: GenerateArgs,
        /// Rows per transaction (defaults to TWEETDB_INGEST_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Create the tweets table and index if missing
    EnsureSchema,
    /// Show tweet counts per company
    Stats,
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

/// Connect using the configured pool settings. Fails before any work if
/// `DATABASE_URL` is missing.
async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config.require_database_url()?;
    let pool_config = tweetdb_db::PoolConfig::from_app_config(config);
    let pool = tweetdb_db::connect_pool(database_url, pool_config).await?;
    Ok(pool)
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Generate { args, output }) => {
            generate::run_generate(&args, &output, config.companies_path.as_deref())?;
        }
        Some(Commands::Load { input, batch_size }) => {
            let pool = connect(config).await?;
            ingest::run_load(&pool, config, &input, batch_size).await?;
        }
        Some(Commands::Ingest { args, batch_size }) => {
            let pool = connect(config).await?;
            ingest::run_generate_and_ingest(&pool, config, &args, batch_size).await?;
        }
        Some(Commands::Db { command }) => {
            let pool = connect(config).await?;
            match command {
                DbCommands::Ping => db::run_ping(&pool).await?,
                DbCommands::EnsureSchema => db::run_ensure_schema(&pool).await?,
                DbCommands::Stats => db::run_stats(&pool).await?,
            }
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match tweetdb_core::load_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config.log_level) {
        eprintln!("error: invalid log filter '{}': {e}", config.log_level);
        return ExitCode::FAILURE;
    }

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
