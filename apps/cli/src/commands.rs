//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use taxsubset_core::pipeline::{ProgressReporter, RunResult};
use taxsubset_shared::{AppConfig, RunConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// taxsubset — extract a curated product taxonomy subset.
#[derive(Parser)]
#[command(
    name = "taxsubset",
    version,
    about = "Fetch the Google Product Taxonomy and write the curated electronics subset.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output path for the subset JSON (defaults to public/taxonomy-subset.json).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Disable TLS certificate verification for the fetch.
    /// Only use when the endpoint's certificate chain is known broken.
    #[arg(long)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands. Invoked bare, the tool runs the fetch pipeline.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
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

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "taxsubset=info",
        1 => "taxsubset=debug",
        _ => "taxsubset=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => cmd_fetch(cli.out.as_deref(), cli.insecure).await,
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(out: Option<&str>, insecure: bool) -> Result<()> {
    let config = load_config()?;

    // Merge config file values with CLI flag overrides
    let mut run_config = RunConfig::from(&config);
    if let Some(path) = out {
        run_config.output_path = path.into();
    }
    if insecure {
        run_config.insecure = true;
    }

    info!(
        url = %run_config.source_url,
        out = %run_config.output_path.display(),
        "extracting taxonomy subset"
    );

    let reporter = CliProgress::new();
    let result = taxsubset_core::pipeline::run(&run_config, &reporter).await?;

    // Print summary
    println!();
    println!("  Taxonomy subset written!");
    println!("  Source: {}", run_config.source_url);
    println!("  Count:  {}", result.category_count);
    println!(
        "  Padded: {}",
        if result.padded { "yes" } else { "no" }
    );
    println!("  Path:   {}", result.output_path.display());
    println!("  Time:   {:.1}s", result.elapsed.as_secs_f64());
    println!();
    println!("  Categories included:");
    for (i, category) in result.categories.iter().enumerate() {
        println!("  {:2}. {category}", i + 1);
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}
