//! # eventgate
//!
//! The main binary for the eventgate query/mutation gateway.
//!
//! This application provides:
//! - HTTP operation router (axum-based)
//! - CLI interface for inspecting and exercising the gateway offline
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/eventgate (THE BINARY)             │
//! │                                                          │
//! │   ┌─────────────┐      ┌──────────────┐                  │
//! │   │    CLI      │      │   HTTP API   │                  │
//! │   │   (clap)    │      │    (axum)    │                  │
//! │   └──────┬──────┘      └──────┬───────┘                  │
//! │          └──────────┬─────────┘                          │
//! │                     ▼                                    │
//! │            ┌────────────────┐                            │
//! │            │ eventgate-core │                            │
//! │            │  (THE LOGIC)   │                            │
//! │            └────────────────┘                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! eventgate serve --host 0.0.0.0 --port 4000
//!
//! # Read-only deployment with a custom seed
//! eventgate --read-only --seed seed.toml serve
//!
//! # Offline operations
//! eventgate status
//! eventgate check
//! eventgate op '{"operation":"getEvent","id":"e1","fields":["user","participants"]}'
//! ```

use clap::Parser;
use eventgate::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // EVENTGATE_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr; stdout carries command output.
    let log_format = std::env::var("EVENTGATE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eventgate=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the eventgate startup banner.
fn print_banner() {
    println!(
        r#"
  eventgate v{}
  users · events · locations · participants
"#,
        env!("CARGO_PKG_VERSION")
    );
}
