//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration.
///
/// Starts from defaults or an optional TOML file, then applies
/// environment overrides: `AUTH_SERVICE_URL`, `ROUTE_SERVICE_URL`,
/// `SUBSCRIPTION_SERVICE_URL`, `BIND_ADDRESS`, `PORT`.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, |key| env::var(key).ok());
    normalize(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides from a lookup function.
///
/// `BIND_ADDRESS` wins over `PORT`; `PORT` only rewrites the port of the
/// configured bind address.
pub fn apply_overrides<F>(config: &mut GatewayConfig, get: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = get("AUTH_SERVICE_URL") {
        config.upstreams.auth = v;
    }
    if let Some(v) = get("ROUTE_SERVICE_URL") {
        config.upstreams.route = v;
    }
    if let Some(v) = get("SUBSCRIPTION_SERVICE_URL") {
        config.upstreams.subscription = v;
    }
    if let Some(port) = get("PORT") {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(h, _)| h.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }
    if let Some(v) = get("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
}

/// Strip trailing slashes from base addresses so that base + path
/// concatenation stays verbatim.
pub fn normalize(config: &mut GatewayConfig) {
    for base in [
        &mut config.upstreams.auth,
        &mut config.upstreams.route,
        &mut config.upstreams.subscription,
    ] {
        while base.ends_with('/') {
            base.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        let mut config = GatewayConfig::default();
        config.upstreams.auth = "http://localhost:3001///".to_string();
        config.upstreams.route = "http://localhost:3002/".to_string();
        normalize(&mut config);
        assert_eq!(config.upstreams.auth, "http://localhost:3001");
        assert_eq!(config.upstreams.route, "http://localhost:3002");
        assert_eq!(config.upstreams.subscription, "http://localhost:3003");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GatewayConfig::default();
        apply_overrides(&mut config, |key| match key {
            "AUTH_SERVICE_URL" => Some("http://auth.internal:9000/".to_string()),
            "PORT" => Some("4000".to_string()),
            _ => None,
        });
        assert_eq!(config.upstreams.auth, "http://auth.internal:9000/");
        assert_eq!(config.listener.bind_address, "0.0.0.0:4000");
        // untouched fields keep defaults
        assert_eq!(config.upstreams.route, "http://localhost:3002");
    }

    #[test]
    fn test_bind_address_wins_over_port() {
        let mut config = GatewayConfig::default();
        apply_overrides(&mut config, |key| match key {
            "PORT" => Some("4000".to_string()),
            "BIND_ADDRESS" => Some("127.0.0.1:8888".to_string()),
            _ => None,
        });
        assert_eq!(config.listener.bind_address, "127.0.0.1:8888");
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml_src = r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [upstreams]
            auth = "http://localhost:5001"

            [timeouts]
            probe_secs = 5
        "#;
        let config: GatewayConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.upstreams.auth, "http://localhost:5001");
        assert_eq!(config.timeouts.probe_secs, 5);
        // defaults fill the gaps
        assert_eq!(config.timeouts.proxy_secs, 30);
    }
}
