//! # eventgate
//!
//! Application layer over `eventgate-core`: the HTTP operation router, the
//! CLI and configuration loading. Exposed as a library so integration tests
//! can build routers and configs directly (via `eventgate::api::*`).

pub mod api;
pub mod cli;
pub mod config;
