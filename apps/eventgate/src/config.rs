//! # Configuration
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. A TOML file (`--config eventgate.toml`), all sections optional
//! 2. `EVENTGATE_*` environment variables
//! 3. CLI flags (applied by the `cli` module)
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 4000
//! rate_limit = 100
//! cors_origins = ["http://localhost:3000"]
//!
//! [gateway]
//! mode = "read_only"
//! dangling = "lenient"
//!
//! [seed]
//! path = "seed.json"
//! ```

use eventgate_core::{
    DanglingPolicy, EntityStore, Gateway, GatewayError, GatewayMode, SeedData, integrity_report,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port the HTTP server binds to.
pub const DEFAULT_PORT: u16 = 4000;

/// Default request rate limit (requests per second, 0 disables).
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Default maximum request body size (1 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Maximum seed file size (50 MB).
const MAX_SEED_FILE_SIZE: u64 = 50 * 1024 * 1024;

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub seed: SeedConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients; 0 disables the limiter.
    pub rate_limit: u32,
    /// Allowed CORS origins. `None` means localhost only, `["*"]` means any.
    pub cors_origins: Option<Vec<String>>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// `host:port` socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gateway capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub dangling: DanglingPolicy,
}

/// Where the initial records come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON or TOML seed file; the built-in seed set when absent.
    pub path: Option<PathBuf>,
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, GatewayError> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    GatewayError::Config(format!("Cannot read '{}': {}", path.display(), e))
                })?;
                Self::from_toml_str(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, GatewayError> {
        toml::from_str(text).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Apply `EVENTGATE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), GatewayError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `EVENTGATE_*` overrides from an arbitrary lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("EVENTGATE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("EVENTGATE_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| GatewayError::Config(format!("EVENTGATE_PORT '{}': {}", port, e)))?;
        }
        if let Some(limit) = get("EVENTGATE_RATE_LIMIT") {
            self.server.rate_limit = limit.trim().parse().map_err(|e| {
                GatewayError::Config(format!("EVENTGATE_RATE_LIMIT '{}': {}", limit, e))
            })?;
        }
        if let Some(origins) = get("EVENTGATE_CORS_ORIGINS") {
            self.server.cors_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        if let Some(mode) = get("EVENTGATE_MODE") {
            self.gateway.mode = parse_mode(&mode)?;
        }
        if let Some(policy) = get("EVENTGATE_DANGLING") {
            self.gateway.dangling = parse_dangling(&policy)?;
        }
        if let Some(seed) = get("EVENTGATE_SEED") {
            self.seed.path = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// Build the gateway described by this configuration.
    ///
    /// Loads the seed file if one is configured and logs any integrity
    /// issues it contains; those do not prevent startup.
    pub fn build_gateway(&self) -> Result<Gateway, GatewayError> {
        let seed = match &self.seed.path {
            Some(path) => load_seed(path)?,
            None => SeedData::builtin(),
        };

        let store = EntityStore::from_seed(seed);
        let report = integrity_report(&store);
        for issue in &report.issues {
            tracing::warn!(event = "seed_integrity", "{}", issue);
        }

        let gateway = Gateway::new(store, self.gateway.mode, self.gateway.dangling);
        let counts = gateway.counts();
        tracing::info!(
            mode = %gateway.mode(),
            users = counts.users,
            events = counts.events,
            locations = counts.locations,
            participants = counts.participants,
            "Gateway initialized"
        );
        Ok(gateway)
    }
}

/// Parse a gateway mode name (`full`, `read_only`, `read-only`, `readonly`).
pub fn parse_mode(value: &str) -> Result<GatewayMode, GatewayError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "full" => Ok(GatewayMode::Full),
        "read_only" | "read-only" | "readonly" => Ok(GatewayMode::ReadOnly),
        other => Err(GatewayError::Config(format!(
            "Unknown gateway mode '{}' (expected full or read_only)",
            other
        ))),
    }
}

/// Parse a dangling-reference policy name (`strict`, `lenient`).
pub fn parse_dangling(value: &str) -> Result<DanglingPolicy, GatewayError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(DanglingPolicy::Strict),
        "lenient" => Ok(DanglingPolicy::Lenient),
        other => Err(GatewayError::Config(format!(
            "Unknown dangling policy '{}' (expected strict or lenient)",
            other
        ))),
    }
}

// =============================================================================
// SEED FILES
// =============================================================================

/// Read seed data from a `.json` or `.toml` file.
pub fn load_seed(path: &Path) -> Result<SeedData, GatewayError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        GatewayError::Seed(format!("Cannot read seed file '{}': {}", path.display(), e))
    })?;
    if metadata.len() > MAX_SEED_FILE_SIZE {
        return Err(GatewayError::Seed(format!(
            "Seed file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SEED_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        GatewayError::Seed(format!("Cannot read seed file '{}': {}", path.display(), e))
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("toml") => toml::from_str(&text).map_err(|e| GatewayError::Seed(e.to_string())),
        Some("json") | None => {
            serde_json::from_str(&text).map_err(|e| GatewayError::Seed(e.to_string()))
        }
        Some(other) => Err(GatewayError::Seed(format!(
            "Unsupported seed format '.{}' (expected .json or .toml)",
            other
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================
