//! # eventgate CLI Module
//!
//! This module implements the CLI interface for eventgate.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `status` - Show collection sizes of the configured seed
//! - `check` - Report dangling references and duplicate ids in the seed
//! - `op` - Run a single operation offline and print the response

mod commands;

use crate::config::{Config, parse_dangling};
use clap::{Parser, Subcommand};
use eventgate_core::{DanglingPolicy, GatewayError, GatewayMode};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// eventgate - query/mutation gateway over in-memory relational collections
#[derive(Parser, Debug)]
#[command(name = "eventgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a JSON or TOML seed file (overrides config)
    #[arg(short, long, global = true)]
    pub seed: Option<PathBuf>,

    /// Expose reads only; no mutations, no id generation
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Dangling reference policy: "strict" (fail the read) or "lenient" (null)
    #[arg(long, global = true)]
    pub dangling: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show collection sizes
    Status,

    /// Check seed data for dangling references and duplicate ids
    Check,

    /// Run one operation, e.g. '{"operation":"getEvent","id":"e1","fields":["user"]}'
    Op {
        /// Operation as JSON
        request: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration: file, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, GatewayError> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env()?;

    if let Some(seed) = &cli.seed {
        config.seed.path = Some(seed.clone());
    }
    if cli.read_only {
        config.gateway.mode = GatewayMode::ReadOnly;
    }
    if let Some(policy) = &cli.dangling {
        config.gateway.dangling = parse_dangling(policy)?;
    }
    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), GatewayError> {
    let config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { .. }) => cmd_serve(&config).await,
        Some(Commands::Status) | None => cmd_status(&config, json_mode),
        Some(Commands::Check) => cmd_check(&config, json_mode),
        Some(Commands::Op { request }) => cmd_op(&config, &request),
    }
}

/// Label for a dangling policy in human output.
fn policy_label(policy: DanglingPolicy) -> &'static str {
    match policy {
        DanglingPolicy::Strict => "strict",
        DanglingPolicy::Lenient => "lenient",
    }
}
