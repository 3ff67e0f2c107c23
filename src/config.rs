use std::time::Duration;
use tracing::warn;

/// Default capacity of the user actor's mailbox
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Environment variable overriding [`DEFAULT_MAILBOX_CAPACITY`]
pub const MAILBOX_CAPACITY_ENV: &str = "USER_DIRECTORY_MAILBOX_CAPACITY";

/// Default time shutdown waits for the user actor to stop
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable overriding [`DEFAULT_SHUTDOWN_TIMEOUT`], in milliseconds
pub const SHUTDOWN_TIMEOUT_ENV: &str = "USER_DIRECTORY_SHUTDOWN_TIMEOUT_MS";

/// Configuration for the user directory system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    /// Requests that may queue for the actor before senders wait
    pub mailbox_capacity: usize,
    /// How long shutdown waits before aborting the actor
    pub shutdown_timeout: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl SystemConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable or zero values fall back to the default.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(MAILBOX_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.mailbox_capacity = capacity,
                _ => warn!(value = %raw, var = MAILBOX_CAPACITY_ENV, "Ignoring invalid mailbox capacity"),
            }
        }
        if let Some(raw) = lookup(SHUTDOWN_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => config.shutdown_timeout = Duration::from_millis(millis),
                _ => warn!(value = %raw, var = SHUTDOWN_TIMEOUT_ENV, "Ignoring invalid shutdown timeout"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SystemConfig::from_lookup(|_| None);
        assert_eq!(config.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
        assert_eq!(config.shutdown_timeout, DEFAULT_SHUTDOWN_TIMEOUT);
    }

    #[test]
    fn test_config_override() {
        let config = SystemConfig::from_lookup(|_| Some("8".to_string()));
        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.shutdown_timeout, Duration::from_millis(8));
    }

    #[test]
    fn test_config_rejects_zero_and_garbage() {
        assert_eq!(SystemConfig::from_lookup(|_| Some("0".into())), SystemConfig::default());
        assert_eq!(SystemConfig::from_lookup(|_| Some("many".into())), SystemConfig::default());
    }
}
