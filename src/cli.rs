//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Snaplink - URL shortener with access analytics
#[derive(Parser, Debug)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "URL shortener with access analytics", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print a sample configuration file to stdout
    GenerateConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve_mode() {
        let cli = Cli::try_parse_from(["snaplink"]).unwrap();
        assert_eq!(cli.config, "config.toml");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_flag_and_subcommand() {
        let cli = Cli::try_parse_from(["snaplink", "-c", "/etc/snaplink.toml", "generate-config"])
            .unwrap();
        assert_eq!(cli.config, "/etc/snaplink.toml");
        assert_eq!(cli.command, Some(Commands::GenerateConfig));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["snaplink", "tui"]).is_err());
    }
}
