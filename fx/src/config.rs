//! Exchange rate client configuration.

use std::time::Duration;

/// Remote rates provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,
    /// Access key sent with every request.
    pub access_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangeratesapi.io".to_string(),
            access_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("EXCHANGE_RATES_API_URL") {
            config.base_url = url;
        }

        if let Ok(key) = std::env::var("EXCHANGE_RATES_API_KEY") {
            config.access_key = key;
        }

        if let Ok(secs) = std::env::var("EXCHANGE_RATES_API_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Provider base URL cannot be empty".to_string());
        }

        if self.access_key.is_empty() {
            return Err("Provider access key cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Prefix of every cache key.
    pub key_prefix: String,
    /// Entry lifetime. `None` leaves expiry to the store.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: "xr".to_string(),
            ttl: None,
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(prefix) = std::env::var("EXCHANGE_RATES_CACHE_PREFIX") {
            config.key_prefix = prefix;
        }

        if let Ok(secs) = std::env::var("EXCHANGE_RATES_CACHE_TTL_SECS") {
            if let Ok(secs) = secs.parse() {
                config.ttl = Some(Duration::from_secs(secs));
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.key_prefix.is_empty() {
            return Err("Cache key prefix cannot be empty".to_string());
        }

        if self.ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err("Cache TTL cannot be zero".to_string());
        }

        Ok(())
    }
}

/// Where the set of valid currency codes comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencySource {
    /// The built-in fallback list.
    #[default]
    Static,
    /// Fetched once from the provider, on first validation.
    Provider,
}

/// Main exchange rate client configuration.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRateConfig {
    /// Provider configuration.
    pub provider: ProviderConfig,
    /// Cache configuration.
    pub cache: CacheConfig,
    /// Source of the known currency set.
    pub currency_source: CurrencySource,
}

impl ExchangeRateConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            provider: ProviderConfig::from_env(),
            cache: CacheConfig::from_env(),
            currency_source: CurrencySource::default(),
        };

        if let Ok(source) = std::env::var("EXCHANGE_RATES_CURRENCY_SOURCE") {
            if source.eq_ignore_ascii_case("provider") {
                config.currency_source = CurrencySource::Provider;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.provider.validate()?;
        self.cache.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_config() {
        let config = CacheConfig::default();
        assert_eq!(config.key_prefix, "xr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_cache_config() {
        let mut config = CacheConfig::default();
        config.ttl = Some(Duration::ZERO);
        assert!(config.validate().is_err());

        config.ttl = None;
        config.key_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_requires_key() {
        let mut config = ProviderConfig::default();
        assert!(config.validate().is_err());

        config.access_key = "secret".to_string();
        assert!(config.validate().is_ok());

        config.base_url.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_provider_and_cache() {
        let mut config = ExchangeRateConfig::default();
        assert!(config.validate().is_err());

        config.provider.access_key = "secret".to_string();
        assert!(config.validate().is_ok());

        config.cache.key_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_currency_source() {
        assert_eq!(ExchangeRateConfig::default().currency_source, CurrencySource::Static);
    }
}
