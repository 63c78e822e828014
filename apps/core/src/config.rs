use anyhow::{Context, Result};

/// Fallback backend base URL, matching the development default of the service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Per-request timeout budget in seconds when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
/// Every variable has a sensible default; loading never requires a `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote parse/score backend.
    pub api_base_url: String,
    /// Timeout budget applied to every backend call. A hung request fails
    /// with a connectivity error instead of pinning the flow in-flight.
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: std::env::var("ATS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs: std::env::var("ATS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("ATS_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        }
    }
}
