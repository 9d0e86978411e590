//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use jobcarousel_core::{FeedOrigin, IngestOptions, JobFeed, load_feed, resolve_feed};
use jobcarousel_shared::{
    AppConfig, JobCarouselError, UndatedPolicy, init_config, load_config, validate_config,
};
use jobcarousel_source::FetchOptions;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Job carousel — fetch, normalize and rank the job sheet feed.
#[derive(Parser)]
#[command(
    name = "jobcarousel",
    version,
    about = "Fetch the published job sheet and print the feed the carousel would show.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Feed output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the live sheet and print the resulting feed.
    Fetch {
        /// CSV export URL (defaults to the configured source).
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Run the pipeline over a local CSV file.
    Parse {
        /// CSV file to read.
        file: PathBuf,

        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Print the embedded sample feed.
    Sample {
        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides shared by `fetch` and `parse`.
#[derive(Args, Debug)]
pub(crate) struct FeedArgs {
    /// Output format.
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Maximum number of jobs in the feed.
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Recency window in days.
    #[arg(long)]
    pub window_days: Option<u32>,

    /// Maximum number of sheet rows scanned.
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Drop jobs whose posted date can't be parsed.
    #[arg(long)]
    pub exclude_undated: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is the feed.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "jobcarousel=warn",
        1 => "jobcarousel=info",
        2 => "jobcarousel=debug",
        _ => "jobcarousel=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch { url, feed } => cmd_fetch(url.as_deref(), &feed).await,
        Command::Parse { file, feed } => cmd_parse(&file, &feed),
        Command::Sample { format } => cmd_sample(format),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Load config and apply command-line overrides.
fn resolve_config(args: &FeedArgs) -> Result<AppConfig> {
    let mut config = load_config()?;

    if let Some(n) = args.max_results {
        config.ingest.max_results = n;
    }
    if let Some(days) = args.window_days {
        config.ingest.window_days = days;
    }
    if let Some(rows) = args.max_rows {
        config.ingest.max_rows_scanned = rows;
    }
    if args.exclude_undated {
        config.ingest.undated = UndatedPolicy::Exclude;
    }

    validate_config(&config)?;
    Ok(config)
}

async fn cmd_fetch(url: Option<&str>, args: &FeedArgs) -> Result<()> {
    let mut config = resolve_config(args)?;
    if let Some(url) = url {
        config.source.csv_url = url.to_string();
    }

    let fetch = FetchOptions::from(&config);
    let ingest = IngestOptions::from(&config);

    info!(url = %fetch.url, "loading job feed");

    let spinner = spinner("Fetching job sheet...");
    let feed = load_feed(&fetch, &ingest).await;
    spinner.finish_and_clear();

    print_feed(&feed, args.format, &config.source.sheet_url)
}

fn cmd_parse(file: &Path, args: &FeedArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let ingest = IngestOptions::from(&config);

    info!(file = %file.display(), "parsing local CSV");

    let text = std::fs::read_to_string(file).map_err(|e| JobCarouselError::io(file, e));
    let feed = resolve_feed(text, Utc::now(), &ingest);

    print_feed(&feed, args.format, &config.source.sheet_url)
}

fn cmd_sample(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let feed = JobFeed::sample("sample data requested");
    print_feed(&feed, format, &config.source.sheet_url)
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

fn print_feed(feed: &JobFeed, format: OutputFormat, sheet_url: &str) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "origin": feed.origin,
                "total": feed.total(),
                "stats": feed.stats,
                "jobs": feed.jobs,
                "sheetUrl": sheet_url,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => print_feed_text(feed, sheet_url),
    }
    Ok(())
}

fn print_feed_text(feed: &JobFeed, sheet_url: &str) {
    println!();
    match &feed.origin {
        FeedOrigin::Live => println!("  Live feed: {} jobs", feed.total()),
        FeedOrigin::Sample { reason } => {
            println!("  Loading sample jobs ({reason}): {} jobs", feed.total())
        }
    }
    if let Some(stats) = &feed.stats {
        println!(
            "  Rows:  {} scanned, {} skipped, {} rejected, {} normalized, {} shown",
            stats.lines_scanned, stats.skipped, stats.rejected, stats.normalized, stats.ranked
        );
    }

    if feed.jobs.is_empty() {
        println!();
        println!("  No Jobs Available. Check back soon for new opportunities!");
    }

    let total = feed.total();
    for (i, job) in feed.jobs.iter().enumerate() {
        println!();
        println!("  [{}/{total}] {} - {}", i + 1, job.title, job.company);
        println!("    {} | {} | {}", job.location, job.pay_range, job.employment_type);
        println!("    {} ({})", job.inspection_type, job.icon());
        println!("    {}", job.description);
        println!("    Posted: {} via {}", job.posted_date, job.source);
        if !job.benefits.is_empty() {
            println!("    Benefits: {}", job.benefits);
        }
        if !job.qualifications.is_empty() {
            println!("    Qualifications: {}", job.qualifications);
        }
        if job.has_link() {
            println!("    Apply: {}", job.link);
        } else {
            println!("    Apply: link unavailable");
        }
    }

    println!();
    println!("  View all jobs: {sheet_url}");
    println!();
}
