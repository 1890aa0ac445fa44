use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use platform_api::{DEFAULT_COLLECTION_PATH, EmployeeClient, Endpoint};

use crate::feedback::{ClearPolicy, DEFAULT_STATUS_TTL, StatusBanner};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub collection_path: String,
    pub request_timeout: Duration,
    pub status_ttl: Duration,
    pub clear_policy: ClearPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            collection_path: DEFAULT_COLLECTION_PATH.into(),
            request_timeout: Duration::from_secs(10),
            status_ttl: DEFAULT_STATUS_TTL,
            clear_policy: ClearPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_url = var("REGISTRY_API_URL").unwrap_or(defaults.api_url);
        let collection_path =
            var("REGISTRY_COLLECTION_PATH").unwrap_or(defaults.collection_path);

        let request_timeout = match var("REGISTRY_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("invalid REGISTRY_REQUEST_TIMEOUT_SECS {raw:?}"))?,
            ),
            None => defaults.request_timeout,
        };

        let status_ttl = match var("REGISTRY_STATUS_TTL_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .with_context(|| format!("invalid REGISTRY_STATUS_TTL_MS {raw:?}"))?,
            ),
            None => defaults.status_ttl,
        };

        let clear_policy = match var("REGISTRY_STATUS_CLEAR") {
            Some(raw) => ClearPolicy::from_str(&raw, true)
                .map_err(|_| anyhow!("REGISTRY_STATUS_CLEAR must be `unconditional` or `latest-wins`, got {raw:?}"))?,
            None => defaults.clear_policy,
        };

        Ok(Self {
            api_url,
            collection_path,
            request_timeout,
            status_ttl,
            clear_policy,
        })
    }

    pub fn client(&self) -> Result<EmployeeClient> {
        let endpoint = Endpoint::new(&self.api_url, &self.collection_path)?
            .with_timeout(self.request_timeout);
        EmployeeClient::new(endpoint).context("failed to build HTTP client")
    }

    pub fn banner(&self) -> StatusBanner {
        StatusBanner::new(self.status_ttl, self.clear_policy)
    }
}
