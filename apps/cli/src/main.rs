//! Chromatrace CLI - inspect and preview syntax-highlighted traces
//!
//! This CLI provides a `chromatrace` command for checking how the panic hook
//! would behave in the current terminal and for highlighting saved traces.

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use chromatrace_core::HookConfig;
use commands::{demo, probe, render, styles};

/// Chromatrace - syntax-highlighted panic traces
#[derive(Parser, Debug)]
#[command(
    name = "chromatrace",
    author,
    version,
    about = "Chromatrace - syntax-highlighted panic traces",
    long_about = "Chromatrace prints panic and error traces with syntax highlighting when stderr is a terminal.\nThis tool shows what the hook detects and previews highlighted output."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (skips config discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the activation decision, color depth and rendering profile
    Probe {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Highlight trace text from a file or stdin
    ///
    /// Output goes to stdout and is colored even when stdout is not a
    /// terminal. `NO_COLOR` still disables coloring.
    Render {
        /// Trace file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Highlighting style
        #[arg(short, long)]
        style: Option<String>,

        /// Color count override (16, 256, 16777216)
        #[arg(long)]
        colors: Option<u32>,
    },

    /// List style aliases and bundled themes
    Styles,

    /// Install the hook and fail on purpose
    Demo {
        /// Return an error from main instead of panicking
        #[arg(long)]
        error: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_deref())?;

    // If no command provided, show help
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Probe { json } => probe::execute(config, json)?,
        Command::Render { file, style, colors } => render::execute(config, file, style, colors)?,
        Command::Styles => styles::execute()?,
        Command::Demo { error } => demo::execute(config, error)?,
    }

    Ok(())
}

/// Configuration from `--config` or discovery, with environment overrides.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<HookConfig> {
    match path {
        Some(path) => {
            let mut config = HookConfig::load_from_file(path)?;
            config.apply_env_with(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Ok(HookConfig::discover()),
    }
}
