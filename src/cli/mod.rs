mod args;
mod global;
mod handlers;
mod streams;

use clap::{Parser, Subcommand};
use lz78::Lz78Config;
use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{CompressArgs, ConfigArgs, DecompressArgs, InspectArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "lz78")]
#[command(version)]
#[command(about = "LZ78 dictionary compressor for arbitrary files", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file or stdin
    #[command(short_flag = 'c', visible_alias = "c")]
    Compress(CompressArgs),

    /// Decompress a file or stdin
    #[command(short_flag = 'x', visible_alias = "x")]
    Decompress(DecompressArgs),

    /// Show the header and token stream of a compressed file
    Inspect(InspectArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let config = load_config(&cli.global)?;

    match cli.command {
        Commands::Compress(args) => handlers::compress::handle(args, &cli.global, &config),
        Commands::Decompress(args) => handlers::decompress::handle(args, &cli.global, &config),
        Commands::Inspect(args) => handlers::inspect::handle(args, &cli.global, &config),
        Commands::Config(args) => handlers::config::handle(args, &cli.global, &config),
    }
}

/// Logs go to stderr; stdout carries data.
fn init_logging(global: &GlobalArgs) {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LZ78_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(global.log_level()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

/// Built-in defaults, user and working-directory files, then `--config`.
fn load_config(global: &GlobalArgs) -> Result<Lz78Config, Box<dyn std::error::Error>> {
    let mut config = Lz78Config::load_with_overrides()?;

    if let Some(path) = &global.config_file {
        let expanded = shellexpand::tilde(path);
        let explicit = Lz78Config::load_from_file(Path::new(expanded.as_ref()))
            .map_err(|e| format!("Cannot load config '{}': {}", path, e))?;
        config.merge(explicit);
    }

    Ok(config)
}
