//! CLI command definitions for the `cstore` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod search;
pub mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Browse convenience-store promotions and chat with a deals assistant.
#[derive(Parser)]
#[command(name = "cstore", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to cstore.toml (defaults to ./cstore.toml when present).
    #[arg(long, global = true, env = "CSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show catalog statistics per brand.
    Summary,

    /// Search promotional products by name.
    Search {
        /// Case-insensitive substring of the product name.
        query: String,

        /// Only show one brand (CU, GS25, 7Eleven, emart24).
        #[arg(long, short)]
        brand: Option<String>,

        /// Maximum number of rows to print.
        #[arg(long, short, default_value = "20")]
        limit: usize,
    },

    /// Chat with the deals assistant.
    Chat {
        /// Groq API key. Prompted for when absent.
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Start the HTTP API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host address to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_flags() {
        let cli = Cli::try_parse_from(["cstore", "--json", "search", "바나나", "--brand", "CU", "-l", "5"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Search {
                query,
                brand,
                limit,
            } => {
                assert_eq!(query, "바나나");
                assert_eq!(brand.as_deref(), Some("CU"));
                assert_eq!(limit, 5);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["cstore", "-vv", "summary"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Summary));
    }
}
