//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check base addresses are absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, bind address parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBaseAddress { service: &'static str, reason: String },
    InvalidBindAddress { address: String },
    ZeroTimeout { field: &'static str },
    TimeoutOrdering,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBaseAddress { service, reason } => {
                write!(f, "upstream '{}' base address invalid: {}", service, reason)
            }
            ValidationError::InvalidBindAddress { address } => {
                write!(f, "bind address '{}' is not a valid socket address", address)
            }
            ValidationError::ZeroTimeout { field } => {
                write!(f, "timeout '{}' must be greater than zero", field)
            }
            ValidationError::TimeoutOrdering => {
                write!(f, "request_secs must exceed proxy_secs")
            }
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (service, base) in [
        ("auth", &config.upstreams.auth),
        ("route", &config.upstreams.route),
        ("subscription", &config.upstreams.subscription),
    ] {
        match Url::parse(base) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(ValidationError::InvalidBaseAddress {
                        service,
                        reason: format!("unsupported scheme '{}'", url.scheme()),
                    });
                }
            }
            Err(e) => {
                errors.push(ValidationError::InvalidBaseAddress {
                    service,
                    reason: e.to_string(),
                });
            }
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            address: config.listener.bind_address.clone(),
        });
    }

    for (field, value) in [
        ("proxy_secs", config.timeouts.proxy_secs),
        ("probe_secs", config.timeouts.probe_secs),
        ("request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    if config.timeouts.request_secs <= config.timeouts.proxy_secs {
        errors.push(ValidationError::TimeoutOrdering);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.upstreams.auth = "not a url".to_string();
        config.upstreams.route = "ftp://localhost:3002".to_string();
        config.timeouts.probe_secs = 0;
        config.listener.bind_address = "nonsense".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_request_timeout_must_exceed_proxy_timeout() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = config.timeouts.proxy_secs;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::TimeoutOrdering));
    }
}
