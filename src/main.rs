//! Feedback Analyzer - Training Feedback Classification & Aggregation
//!
//! Command-line entry point. Tables go to stdout (or the requested file),
//! logs go to stderr.

mod cli;

use clap::{Parser, Subcommand};
use feedback_core::{Category, SchemaKind};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedback-analyzer")]
#[command(about = "Classify and aggregate training feedback", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (defaults to feedback-analyzer.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cumulative store path (overrides FEEDBACK_STORE_PATH and the config file)
    #[arg(long, global = true)]
    store_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and categorize every record of a feedback table
    Classify {
        /// Feedback table (.csv or .json)
        input: PathBuf,

        /// Output file (.csv, .json or .md); stdout CSV if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count records per topic and trainer (or per topic and category)
    Crosstab {
        /// Feedback table (.csv or .json)
        input: PathBuf,

        /// Restrict to one category (topic x trainer); omit for topic x category
        #[arg(short, long)]
        category: Option<Category>,

        /// Output file (.csv, .json or .md); aligned text on stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the full report bundle (tables and Markdown summary)
    Report {
        /// Feedback table (.csv or .json)
        input: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Extract structured records from OCR text files
    Extract {
        /// Text files, one form per file; form feeds separate pages
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Label vocabulary: name-date or trainer-batch
        #[arg(long)]
        schema: Option<SchemaKind>,

        /// Output CSV file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also append the records to the cumulative store
        #[arg(long)]
        append: bool,
    },

    /// Inspect the cumulative store
    Store {
        #[command(subcommand)]
        action: cli::store::StoreAction,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: cli::config::ConfigAction,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "feedback_core={level},feedback_analyzer={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Feedback Analyzer v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = cli::helpers::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { input, output } => {
            cli::classify::handle(&config, &input, output.as_deref())
        }
        Commands::Crosstab {
            input,
            category,
            output,
        } => cli::crosstab::handle(&config, &input, category, output.as_deref()),
        Commands::Report { input, output_dir } => {
            cli::report::handle(&config, &input, output_dir)
        }
        Commands::Extract {
            inputs,
            schema,
            output,
            append,
        } => cli::extract::handle(
            &config,
            &inputs,
            schema,
            output.as_deref(),
            append,
            cli.store_path,
        ),
        Commands::Store { action } => cli::store::handle(&config, action, cli.store_path),
        Commands::Config { action } => cli::config::handle(&config, action),
    }
}
