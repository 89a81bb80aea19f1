//! plantid CLI - Command-line interface for plant recognition and history.

use clap::Parser;
use plantid_cli::commands;
use plantid_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> plantid_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let config = Config::load(Some(config_path.as_path()))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Recognize(args) => commands::execute_recognize(args, &config, &formatter),
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::History(args) => commands::execute_history(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)
        }
    }
}
