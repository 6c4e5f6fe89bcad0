use std::time::Duration;
use reqwest::Url;
use crate::api::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_AGENT: &str = "InventoryOptimizer/1.0";

pub const ENV_BASE_URL: &str = "INVENTORY_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "INVENTORY_API_TIMEOUT_SECS";

/// Settings handed to [`crate::api::ApiClient::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8080`. `/api` is appended unless already present.
    pub base_url: String,
    /// `None` means a hung request hangs until the caller drops the future.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load from the process environment, reading a `.env` file first if one exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(0) => {}
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!(
                    value = %raw,
                    "ignoring unparseable {}",
                    ENV_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Resolved `<base>/api` prefix every request path is appended to.
    pub fn api_root(&self) -> Result<String, ApiError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');

        let url = Url::parse(trimmed).map_err(|_| ApiError::InvalidConfig(self.base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ApiError::InvalidConfig(self.base_url.clone()));
        }

        if trimmed.ends_with("/api") {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("{}/api", trimmed))
        }
    }
}
