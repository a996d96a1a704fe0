//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::store::{DEFAULT_QUOTA_BYTES, STORAGE_PREFIX};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory for file-backed records; in-memory store when unset
    pub data_dir: Option<PathBuf>,

    /// Key namespace for records
    pub storage_prefix: String,

    /// Byte quota of the in-memory store
    pub store_quota_bytes: usize,

    /// Simulated latency of the mock verification
    pub verification_delay_ms: u64,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: None,
            storage_prefix: STORAGE_PREFIX.to_string(),
            store_quota_bytes: DEFAULT_QUOTA_BYTES,
            verification_delay_ms: 1200,
            environment: "development".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            data_dir: lookup("DATA_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),

            storage_prefix: lookup("STORAGE_PREFIX")
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.storage_prefix),

            store_quota_bytes: lookup("STORE_QUOTA_BYTES")
                .and_then(|q| q.parse().ok())
                .unwrap_or(defaults.store_quota_bytes),

            verification_delay_ms: lookup("VERIFICATION_DELAY_MS")
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.verification_delay_ms),

            environment: lookup("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            log_format: lookup("LOG_FORMAT")
                .unwrap_or(defaults.log_format),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification_delay_ms)
    }

    /// Log filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() {
            "kyc_dashboard=info,tower_http=info"
        } else {
            "kyc_dashboard=debug,tower_http=debug"
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
