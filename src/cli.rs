//! Command-line interface definition for Rosterbot
//!
//! This module defines the CLI structure using clap's derive API. The only
//! mode is a console chat loop standing in for the messaging transport.

use clap::Parser;

/// Rosterbot - fantasy football chat assistant
///
/// Manage your fantasy team through short chat commands: rosters,
/// standings, adds and drops, lineups, trades, and pending transactions.
#[derive(Parser, Debug, Clone)]
#[command(name = "rosterbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// User id the console session runs as
    #[arg(short, long, env = "ROSTERBOT_USER", default_value = "console-user")]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rosterbot"]);
        assert_eq!(cli.config, "config/config.yaml");
        assert_eq!(cli.user, "console-user");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["rosterbot", "-c", "custom.yaml", "--user", "u1", "-v"]);
        assert_eq!(cli.config, "custom.yaml");
        assert_eq!(cli.user, "u1");
        assert!(cli.verbose);
    }
}
