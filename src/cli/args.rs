use clap::Args;
use std::path::PathBuf;

/// Arguments for compressing data
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file ("-" for stdout; derived from FILE if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for decompressing data
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Compressed input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file ("-" for stdout; derived from FILE if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for dumping the token stream of a compressed file
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Compressed input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show at most N tokens
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for showing the effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}
