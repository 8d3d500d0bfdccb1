//! terps CLI: a demo command shell built on terps-core.
//!
//! Runs a single command, an interactive session with line editing and tab
//! completion, or the commands piped on stdin.

mod repl;
mod repl_input;

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use terps_core::{BufferedReader, InterpreterConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::repl_input::ReplInput;

/// terps: a line-oriented command shell with aliases and tab completion
#[derive(Parser, Debug)]
#[command(name = "terps", version, about, long_about = None)]
struct Cli {
    /// Command line to run (starts a session if omitted)
    command: Vec<String>,

    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include aliases in completion and help
    #[arg(long)]
    show_alias: bool,

    /// Do not seed the default alias
    #[arg(long)]
    no_alias: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "terps", "terps")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "terps.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    // Resolve workspace
    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = load(&cli, &workspace)?;
    if cli.show_alias {
        config.show_alias = true;
    }
    if cli.no_alias {
        config.enable_alias = false;
    }

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let interactive = cli.command.is_empty() && io::stdin().is_terminal();
    if interactive && config.intro.is_none() {
        config.intro = Some(repl::INTRO.to_string());
    }

    let mut interp = repl::build_interpreter(config, &workspace)?;
    tracing::debug!(workspace = %workspace.display(), interactive, "Interpreter ready");

    if !cli.command.is_empty() {
        let line = cli.command.join(" ");
        interp.dispatch(&line);
        interp.output().flush()?;
    } else if interactive {
        let mut input = ReplInput::new(&workspace);
        interp.cmdloop(&mut input)?;
    } else {
        let stdin = io::stdin();
        let mut reader = BufferedReader::new(stdin.lock());
        interp.cmdloop(&mut reader)?;
    }

    Ok(())
}

/// Load configuration from the explicit file, or the layered sources.
fn load(cli: &Cli, workspace: &std::path::Path) -> anyhow::Result<InterpreterConfig> {
    match &cli.config {
        Some(path) => Ok(terps_core::load_config_file(path)?),
        None => terps_core::load_config(Some(workspace), None)
            .map_err(|e| anyhow::anyhow!("Configuration error: {}", e)),
    }
}
