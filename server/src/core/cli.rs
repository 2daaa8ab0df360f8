use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_MAX_CLAUSES, ENV_MAX_EXPRESSION_LENGTH, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "citrus-console")]
#[command(version, about = "Citrus Simulator console service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug logging (shows rejected filter input)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Maximum header filter expression length in bytes
    #[arg(long, global = true, env = ENV_MAX_EXPRESSION_LENGTH)]
    pub max_expression_length: Option<usize>,

    /// Maximum number of clauses per header filter expression
    #[arg(long, global = true, env = ENV_MAX_CLAUSES)]
    pub max_clauses: Option<usize>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Work with header filter expressions
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum FilterCommands {
    /// Check that every clause of an expression is valid
    Validate {
        /// Expression, e.g. "key=value; key2>10"
        expression: String,
    },
    /// Decode an expression into form rows (JSON), dropping invalid clauses
    Decode {
        /// Expression, e.g. "key=value; key2>10"
        expression: String,
    },
    /// Encode form rows (JSON array) into an expression
    Encode {
        /// JSON array of clauses, e.g. '[{"key":"k","valueComparator":"=","value":"v"}]'
        clauses: String,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub max_expression_length: Option<usize>,
    pub max_clauses: Option<usize>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        max_expression_length: cli.max_expression_length,
        max_clauses: cli.max_clauses,
    };
    (config, cli.command)
}
