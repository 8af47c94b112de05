mod options;

use clap::{Parser, Subcommand};
pub use options::{ColorMode, OutputFormat};
use std::path::PathBuf;

/// Select STDF test results by test number
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, global = true, env = "STDF_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Device whose filter setting is loaded and saved
    #[arg(long, global = true)]
    pub device: Option<String>,

    /// JSON file holding per-device settings
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a selection such as "1,2-3,7" and print its canonical form
    Parse {
        /// Comma separated test numbers and inclusive ranges
        text: String,
    },
    /// Filter a JSON-lines record file by test number
    Apply {
        /// Record file, one JSON record per line
        file: PathBuf,

        /// Selection to apply instead of the stored setting
        #[arg(short, long)]
        select: Option<String>,

        /// Build the filter but leave it inactive
        #[arg(long)]
        disabled: bool,
    },
    /// Validate and store the selection for the device
    Set {
        /// Comma separated test numbers and inclusive ranges
        text: String,

        /// Store the filter as disabled
        #[arg(long)]
        disable: bool,
    },
    /// Print the stored setting for the device
    Show,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["stdf-filter", "parse", "1-3", "-F", "json", "-vv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Parse { ref text } if text == "1-3"));
    }
}
