use clap::{ArgAction, Args};
use lz78::Lz78Config;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Only report errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Extra configuration file layered over the defaults
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Maximum input size in bytes (0 = unlimited) [default: from config]
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_size: Option<usize>,

    /// Process inputs exceeding --max-size limit
    #[arg(long, global = true)]
    pub force: bool,
}

impl GlobalArgs {
    /// Size limit from the command line, falling back to the configuration.
    pub fn max_size(&self, config: &Lz78Config) -> usize {
        self.max_size.unwrap_or_else(|| config.max_size())
    }

    /// Log filter used when `LZ78_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
