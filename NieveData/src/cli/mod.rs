//! `NieveData` CLI - converts the legacy site XML into JSON

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::ConvertConfig;

#[derive(Parser)]
#[command(name = "nievedata")]
#[command(about = "Convert the Nievemar legacy XML into static-site JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file (defaults apply to any key it leaves out)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the source XML (overrides the config)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Directory to write the JSON into (overrides the config)
    #[arg(short, long, global = true)]
    destination: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress step output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ConvertConfig::default(),
        };
        if let Some(source) = &self.source {
            config.source_dir.clone_from(source);
        }
        if let Some(destination) = &self.destination {
            config.dest_dir.clone_from(destination);
        }
        Ok(config)
    }
}

/// Run the `NieveData` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.load_config()?;
    let command = cli.command.unwrap_or(Commands::All);
    command.execute(&config, cli.quiet)
}

/// Setup logging: `RUST_LOG` when set, otherwise warnings only.
/// `--verbose` always wins with `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
