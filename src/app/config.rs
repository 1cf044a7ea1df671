use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::engine::RetryPolicy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub default_url: String,
    pub fallback_url: String,
    pub queue_capacity: usize,
    pub worker_count: usize,
    pub processor_timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub shutdown_grace: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9999)),
            default_url: "http://payment-processor-default:8080".to_string(),
            fallback_url: "http://payment-processor-fallback:8080".to_string(),
            queue_capacity: 100_000,
            worker_count: 10,
            processor_timeout: Duration::from_millis(15_000),
            retry_policy: RetryPolicy::default(),
            shutdown_grace: Duration::from_millis(5_000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let vars = Vars(lookup);

        let retry_policy = RetryPolicy {
            max_attempts: vars.optional_positive("RETRY_MAX_ATTEMPTS")?,
            base_delay: vars.millis("RETRY_BASE_DELAY_MS", defaults.retry_policy.base_delay)?,
            max_delay: vars.millis("RETRY_MAX_DELAY_MS", defaults.retry_policy.max_delay)?,
        };

        Ok(Self {
            bind_addr: vars.parse("BIND_ADDR", defaults.bind_addr)?,
            default_url: vars.url("PROCESSOR_DEFAULT_URL", defaults.default_url)?,
            fallback_url: vars.url("PROCESSOR_FALLBACK_URL", defaults.fallback_url)?,
            queue_capacity: vars.positive("QUEUE_CAPACITY", defaults.queue_capacity)?,
            worker_count: vars.positive("WORKER_COUNT", defaults.worker_count)?,
            processor_timeout: vars.millis("PROCESSOR_TIMEOUT_MS", defaults.processor_timeout)?,
            retry_policy,
            shutdown_grace: vars.millis("SHUTDOWN_GRACE_MS", defaults.shutdown_grace)?,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn optional<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key)
            .map(|value| {
                value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                    key,
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    fn positive<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Default + PartialEq + Display,
        T::Err: Display,
    {
        nonzero(key, self.parse(key, default)?)
    }

    fn optional_positive<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr + Default + PartialEq + Display,
        T::Err: Display,
    {
        self.optional(key)?.map(|n| nonzero(key, n)).transpose()
    }

    fn millis(&self, key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
        Ok(self
            .optional::<u64>(key)?
            .map(Duration::from_millis)
            .unwrap_or(default))
    }

    fn url(&self, key: &'static str, default: String) -> Result<String, ConfigError> {
        let value = self.get(key).unwrap_or(default);
        match reqwest::Url::parse(&value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
            Ok(url) => Err(ConfigError::Invalid {
                key,
                reason: format!("unsupported scheme {}", url.scheme()),
                value,
            }),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }
}

fn nonzero<T>(key: &'static str, value: T) -> Result<T, ConfigError>
where
    T: Default + PartialEq + Display,
{
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
