//! Foreign-key probe outcome resolution.
//!
//! # Responsibilities
//! - Reduce two independent probe results to one pass/fail decision
//! - Enforce the fixed precedence: user-related failures always beat
//!   route-related failures, regardless of which probe finished first
//!
//! # Design Decisions
//! - Pure function over probe outcomes so the ordering guarantee is
//!   directly testable without any network

use axum::http::StatusCode;
use serde_json::Value;

use crate::upstream::{TransportError, UpstreamResponse};

/// Service names reported in SERVICE_UNAVAILABLE bodies.
pub const AUTH_USER_SERVICE: &str = "auth-user-service";
pub const ROUTE_SERVICE: &str = "route-service";

/// What one existence probe observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The upstream answered; any HTTP status, including 404/5xx.
    Responded(StatusCode),

    /// Transport failure: refused, DNS, or timeout.
    Unreachable,
}

impl ProbeOutcome {
    pub fn from_result(result: &Result<UpstreamResponse, TransportError>) -> Self {
        match result {
            Ok(response) => ProbeOutcome::Responded(response.status),
            Err(_) => ProbeOutcome::Unreachable,
        }
    }
}

/// Final decision over both probes.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Both references exist; delegation may proceed.
    Valid,

    /// A referenced identifier does not exist in its owning service.
    NotFound { field: &'static str, value: Value },

    /// A validation dependency is unreachable or erroring.
    ServiceUnavailable { service: &'static str },
}

/// Resolve both probes with fixed field-order precedence.
///
/// Evaluated top to bottom, first match wins:
/// 1. user probe 404            → NotFound(userId)
/// 2. user probe 5xx/transport  → ServiceUnavailable(auth-user-service)
/// 3. route probe 404           → NotFound(routeId)
/// 4. route probe 5xx/transport → ServiceUnavailable(route-service)
/// 5. otherwise                 → Valid
pub fn resolve(
    user: ProbeOutcome,
    user_id: &Value,
    route: ProbeOutcome,
    route_id: &Value,
) -> ValidationOutcome {
    match user {
        ProbeOutcome::Responded(status) if status == StatusCode::NOT_FOUND => {
            return ValidationOutcome::NotFound {
                field: "userId",
                value: user_id.clone(),
            };
        }
        ProbeOutcome::Responded(status) if status.is_server_error() => {
            return ValidationOutcome::ServiceUnavailable {
                service: AUTH_USER_SERVICE,
            };
        }
        ProbeOutcome::Unreachable => {
            return ValidationOutcome::ServiceUnavailable {
                service: AUTH_USER_SERVICE,
            };
        }
        ProbeOutcome::Responded(_) => {}
    }

    match route {
        ProbeOutcome::Responded(status) if status == StatusCode::NOT_FOUND => {
            ValidationOutcome::NotFound {
                field: "routeId",
                value: route_id.clone(),
            }
        }
        ProbeOutcome::Responded(status) if status.is_server_error() => {
            ValidationOutcome::ServiceUnavailable {
                service: ROUTE_SERVICE,
            }
        }
        ProbeOutcome::Unreachable => ValidationOutcome::ServiceUnavailable {
            service: ROUTE_SERVICE,
        },
        ProbeOutcome::Responded(_) => ValidationOutcome::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok() -> ProbeOutcome {
        ProbeOutcome::Responded(StatusCode::OK)
    }

    fn not_found() -> ProbeOutcome {
        ProbeOutcome::Responded(StatusCode::NOT_FOUND)
    }

    #[test]
    fn test_both_valid() {
        let outcome = resolve(ok(), &json!(14), ok(), &json!(1));
        assert_eq!(outcome, ValidationOutcome::Valid);
    }

    #[test]
    fn test_missing_user_reported_first_when_both_invalid() {
        // Both foreign keys invalid simultaneously: userId wins by
        // field order, never by probe completion order.
        let outcome = resolve(not_found(), &json!(99999), not_found(), &json!(99999));
        assert_eq!(
            outcome,
            ValidationOutcome::NotFound {
                field: "userId",
                value: json!(99999),
            }
        );
    }

    #[test]
    fn test_user_unavailable_beats_route_not_found() {
        let outcome = resolve(ProbeOutcome::Unreachable, &json!(14), not_found(), &json!(1));
        assert_eq!(
            outcome,
            ValidationOutcome::ServiceUnavailable {
                service: AUTH_USER_SERVICE,
            }
        );
    }

    #[test]
    fn test_user_server_error_is_unavailable() {
        let outcome = resolve(
            ProbeOutcome::Responded(StatusCode::INTERNAL_SERVER_ERROR),
            &json!(14),
            ok(),
            &json!(1),
        );
        assert_eq!(
            outcome,
            ValidationOutcome::ServiceUnavailable {
                service: AUTH_USER_SERVICE,
            }
        );
    }

    #[test]
    fn test_route_not_found() {
        let outcome = resolve(ok(), &json!(14), not_found(), &json!(42));
        assert_eq!(
            outcome,
            ValidationOutcome::NotFound {
                field: "routeId",
                value: json!(42),
            }
        );
    }

    #[test]
    fn test_route_transport_failure() {
        let outcome = resolve(ok(), &json!(14), ProbeOutcome::Unreachable, &json!(1));
        assert_eq!(
            outcome,
            ValidationOutcome::ServiceUnavailable {
                service: ROUTE_SERVICE,
            }
        );
    }

    #[test]
    fn test_client_errors_other_than_404_pass() {
        // A 403 from the user probe means the user exists but the
        // probe was not allowed to read it; validation still passes.
        let outcome = resolve(
            ProbeOutcome::Responded(StatusCode::FORBIDDEN),
            &json!(14),
            ok(),
            &json!(1),
        );
        assert_eq!(outcome, ValidationOutcome::Valid);
    }
}
