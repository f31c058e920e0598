use std::path::PathBuf;
use std::time::Duration;

use merchantdesk_state::Vault;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, resolved from the environment with logged defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Directory holding the vault (session record, selections, device id).
    pub data_dir: PathBuf,
    /// Applied to every outgoing request; no call can hang indefinitely.
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("MERCHANTDESK_API_URL").unwrap_or_else(|_| {
            tracing::info!("MERCHANTDESK_API_URL not set; using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        let data_dir = std::env::var("MERCHANTDESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Vault::default_dir());

        let timeout_secs = match std::env::var("MERCHANTDESK_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    "MERCHANTDESK_HTTP_TIMEOUT_SECS is not a number ({raw:?}); using {DEFAULT_TIMEOUT_SECS}"
                );
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_url,
            data_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
