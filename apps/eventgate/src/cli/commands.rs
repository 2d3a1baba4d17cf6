//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::policy_label;
use crate::api::{self, OperationRequest};
use crate::config::Config;
use eventgate_core::{GatewayError, integrity_report};

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(config: &Config) -> Result<(), GatewayError> {
    let gateway = config.build_gateway()?;

    println!("eventgate Starting...");
    println!();
    println!("Configuration:");
    println!("  Address:  {}", config.server.addr());
    println!("  Mode:     {}", gateway.mode());
    println!("  Dangling: {}", policy_label(gateway.policy()));
    match &config.seed.path {
        Some(path) => println!("  Seed:     {}", path.display()),
        None => println!("  Seed:     built-in"),
    }
    println!();
    println!("Endpoints:");
    println!("  POST /operation - Execute a named operation");
    println!("  GET  /status    - Collection sizes");
    println!("  GET  /health    - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(gateway, &config.server).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show collection sizes.
pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), GatewayError> {
    let gateway = config.build_gateway()?;
    let counts = gateway.counts();

    if json_mode {
        let output = serde_json::json!({
            "mode": gateway.mode(),
            "dangling": gateway.policy(),
            "collections": counts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("eventgate Status");
    println!("================");
    println!("Mode:     {}", gateway.mode());
    println!("Dangling: {}", policy_label(gateway.policy()));
    println!();
    println!("Users:        {}", counts.users);
    println!("Events:       {}", counts.events);
    println!("Locations:    {}", counts.locations);
    println!("Participants: {}", counts.participants);

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report integrity issues; fails if any are found.
pub fn cmd_check(config: &Config, json_mode: bool) -> Result<(), GatewayError> {
    let gateway = config.build_gateway()?;
    let report = integrity_report(gateway.store());

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    } else if report.is_clean() {
        println!("No integrity issues found.");
    } else {
        println!("Integrity issues ({}):", report.len());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(GatewayError::Seed(format!(
            "{} integrity issue(s) in seed data",
            report.len()
        )))
    }
}

// =============================================================================
// OP COMMAND
// =============================================================================

/// Run one operation against a fresh gateway and print the response.
///
/// Mutations only affect this process's copy of the seed. A failed
/// operation is printed, then returned as its own error.
pub fn cmd_op(config: &Config, request: &str) -> Result<(), GatewayError> {
    let request: OperationRequest = serde_json::from_str(request)
        .map_err(|e| GatewayError::Serialization(format!("Invalid operation: {}", e)))?;
    let mut gateway = config.build_gateway()?;

    let result = api::execute_operation(&mut gateway, request);
    let (_, response) = api::respond(result.clone());
    println!(
        "{}",
        serde_json::to_string_pretty(&response).unwrap_or_default()
    );

    result.map(|_| ())
}

// =============================================================================
// TESTS
// =============================================================================
