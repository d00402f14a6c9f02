//! Process configuration, read once from the environment at startup.
//!
//! | Variable                  | Default                                   |
//! |---------------------------|-------------------------------------------|
//! | `SHOPDESK_BIND_ADDR`      | `0.0.0.0:8080`                            |
//! | `JWT_SECRET`              | insecure dev secret (logged as a warning) |
//! | `GENERATION_API_KEY`      | unset: AI routes fail with 503            |
//! | `GENERATION_MODEL`        | `gemini-2.0-flash`                        |
//! | `GENERATION_BASE_URL`     | Google's Generative Language endpoint     |
//! | `GENERATION_TIMEOUT_SECS` | `30`                                      |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use shopdesk_infra::ai::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub generation: GeminiConfig,
    pub generation_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = get("SHOPDESK_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "SHOPDESK_BIND_ADDR",
                message: e.to_string(),
            })?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let api_key = get("GENERATION_API_KEY");
        if api_key.is_none() {
            tracing::warn!("GENERATION_API_KEY not set; AI routes will report the service as unavailable");
        }

        let timeout_secs = match get("GENERATION_TIMEOUT_SECS") {
            None => DEFAULT_GENERATION_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "GENERATION_TIMEOUT_SECS",
                        message: format!("expected a positive number of seconds, got '{raw}'"),
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            generation: GeminiConfig {
                base_url: get("GENERATION_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: get("GENERATION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_key,
            },
            generation_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(cfg.generation.model, DEFAULT_MODEL);
        assert_eq!(cfg.generation.api_key, None);
        assert_eq!(cfg.generation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = config(&[
            ("SHOPDESK_BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
            ("GENERATION_API_KEY", "key"),
            ("GENERATION_MODEL", "gemini-test"),
            ("GENERATION_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.generation.api_key.as_deref(), Some("key"));
        assert_eq!(cfg.generation.model, "gemini-test");
        assert_eq!(cfg.generation_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = config(&[("GENERATION_API_KEY", "  ")]).unwrap();
        assert_eq!(cfg.generation.api_key, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(matches!(
            config(&[("SHOPDESK_BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "SHOPDESK_BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("GENERATION_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { key: "GENERATION_TIMEOUT_SECS", .. })
        ));
    }
}
