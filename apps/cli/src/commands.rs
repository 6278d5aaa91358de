//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use galaxy_core::pipeline::{GenerateResult, ProgressReporter};
use galaxy_shared::{
    AppConfig, GraphConfig, config_file_path, init_config, load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Galaxy: turn a markdown content tree into a knowledge graph.
#[derive(Parser)]
#[command(
    name = "galaxy",
    version,
    about = "Generate the knowledge-graph artifact from a markdown content tree.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./galaxy.toml when present).
    #[arg(long, global = true, env = "GALAXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the graph from the content root and write the artifact.
    Generate(GenerateArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for a generation run.
#[derive(Args, Default)]
pub(crate) struct GenerateArgs {
    /// Content root to read documents from.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Artifact file to write.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Build the graph and report counts without writing the artifact.
    #[arg(long)]
    pub dry_run: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults.
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
        0 => "galaxy=info",
        1 => "galaxy=debug",
        _ => "galaxy=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        None => cmd_generate(config_path, GenerateArgs::default(), &cli.log_format),
        Some(Command::Generate(args)) => cmd_generate(config_path, args, &cli.log_format),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_generate(
    config_path: Option<&Path>,
    args: GenerateArgs,
    log_format: &LogFormat,
) -> Result<()> {
    let app_config = resolve_app_config(config_path)?;

    let mut config = GraphConfig::from(&app_config);
    if let Some(content) = args.content {
        config.content_root = content;
    }
    if let Some(out) = args.out {
        config.output_file = out;
    }
    config.dry_run = args.dry_run;

    info!(
        content = %config.content_root.display(),
        out = %config.output_file.display(),
        dry_run = config.dry_run,
        "generating knowledge graph"
    );

    let result = match log_format {
        LogFormat::Text => galaxy_core::generate(&config, &CliProgress::new())?,
        LogFormat::Json => galaxy_core::generate(&config, &galaxy_core::SilentProgress)?,
    };

    // Print summary
    println!();
    println!("  Knowledge graph generated!");
    println!("  Nodes:      {}", result.node_count());
    println!("  Links:      {}", result.link_count());
    println!(
        "  References: {} ({} unresolved, {} self, {} unsupported)",
        result.stats.total(),
        result.stats.unresolved,
        result.stats.self_references,
        result.stats.unsupported
    );
    if !result.load.skipped.is_empty() || result.load.front_matter_fallbacks > 0 {
        println!(
            "  Warnings:   {} skipped, {} front-matter fallbacks",
            result.load.skipped.len(),
            result.load.front_matter_fallbacks
        );
    }
    match &result.artifact {
        Some(artifact) if artifact.unchanged => {
            println!("  Artifact:   {} (unchanged)", artifact.path.display());
        }
        Some(artifact) => {
            println!(
                "  Artifact:   {} ({} bytes, sha256 {})",
                artifact.path.display(),
                artifact.size_bytes,
                &artifact.sha256[..12]
            );
        }
        None => println!("  Artifact:   not written (dry run)"),
    }
    println!("  Time:       {:.2}s", result.elapsed.as_secs_f64());
    println!();

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
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_linked(&self, id: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Linking [{current}/{total}] {id}"));
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Clears the spinner when generation fails before `done`.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
    let path = init_config(&path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_app_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
