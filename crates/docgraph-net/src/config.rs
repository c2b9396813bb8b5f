//! Client configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::graphql::DEFAULT_TENANT_HEADER;

/// Default header carrying the API key.
pub const DEFAULT_API_KEY_HEADER: &str = "X-Apito-Key";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the GraphQL endpoint URL.
pub const BASE_URL_ENV: &str = "DOCGRAPH_BASE_URL";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DOCGRAPH_API_KEY";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DOCGRAPH_TIMEOUT_SECS";

/// Configuration for [`DocgraphClient`](crate::DocgraphClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub base_url: String,
    /// API key sent with every request. Not sent when empty.
    pub api_key: String,
    /// Request timeout for the default transport.
    pub timeout: Duration,
    /// Name of the header carrying the API key.
    pub api_key_header: String,
    /// Name of the header carrying the tenant id.
    pub tenant_header: String,
    /// User agent override for the default transport.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            tenant_header: DEFAULT_TENANT_HEADER.to_string(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for an endpoint and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `DOCGRAPH_BASE_URL` is required. `DOCGRAPH_API_KEY` and
    /// `DOCGRAPH_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::InvalidArgument(format!("{BASE_URL_ENV} is not set")))?;

        let mut config = Self::new(base_url, lookup(API_KEY_ENV).unwrap_or_default());

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                Error::InvalidArgument(format!("{TIMEOUT_ENV} must be whole seconds, got '{raw}'"))
            })?;
            if seconds > 0 {
                config.timeout = Duration::from_secs(seconds);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com/graphql", "key");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key_header, "X-Apito-Key");
        assert_eq!(config.tenant_header, "X-Apito-Tenant-ID");
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com/graphql"),
            (API_KEY_ENV, "secret"),
            (TIMEOUT_ENV, "12"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com/graphql");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_from_lookup_zero_timeout_keeps_default() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com/graphql"),
            (TIMEOUT_ENV, "0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_from_lookup_requires_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[(API_KEY_ENV, "secret")])).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_ENV));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com/graphql"),
            (TIMEOUT_ENV, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
