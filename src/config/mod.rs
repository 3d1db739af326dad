/// Application configuration module
use crate::clients::{DsnUrls, DSN_CONFIG_URL, DSN_STATE_URL};
use crate::services::DEFAULT_MAX_CONFIG_AGE_MINUTES;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub urls: DsnUrls,
    pub max_config_age: chrono::Duration,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let urls = DsnUrls {
            configuration: env::var("DSN_CONFIG_URL").unwrap_or_else(|_| DSN_CONFIG_URL.to_string()),
            state: env::var("DSN_STATE_URL").unwrap_or_else(|_| DSN_STATE_URL.to_string()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let max_config_age = chrono::Duration::seconds(env_i64(
            "MAX_CONFIG_AGE_SECONDS",
            DEFAULT_MAX_CONFIG_AGE_MINUTES * 60,
        ));
        let http_timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECONDS", 30));

        Self {
            bind_addr,
            urls,
            max_config_age,
            http_timeout,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|v: &i64| (0..=i64::from(u32::MAX)).contains(v))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_u64_falls_back_on_garbage() {
        env::set_var("DSN_NOW_TEST_TIMEOUT", "soon");
        assert_eq!(env_u64("DSN_NOW_TEST_TIMEOUT", 30), 30);
        env::remove_var("DSN_NOW_TEST_TIMEOUT");
    }

    #[test]
    fn test_env_i64_reads_value() {
        env::set_var("DSN_NOW_TEST_AGE", "600");
        assert_eq!(env_i64("DSN_NOW_TEST_AGE", 1800), 600);
        env::remove_var("DSN_NOW_TEST_AGE");
    }

    #[test]
    fn test_env_i64_rejects_negative() {
        env::set_var("DSN_NOW_TEST_NEGATIVE_AGE", "-5");
        assert_eq!(env_i64("DSN_NOW_TEST_NEGATIVE_AGE", 1800), 1800);
        env::remove_var("DSN_NOW_TEST_NEGATIVE_AGE");
    }

    #[test]
    fn test_missing_variable_uses_default() {
        assert_eq!(env_u64("DSN_NOW_TEST_UNSET", 7), 7);
    }
}
