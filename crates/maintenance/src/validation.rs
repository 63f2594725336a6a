//! Caller input validation.
//!
//! Every check here is local: nothing in this module touches the network, and
//! a request that fails validation never reaches the gateway.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Duration used when a caller does not specify one.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Longest address accepted (RFC 5321 path limit minus the angle brackets).
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap()
});

/// Reasons a request is rejected before any remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No service identifiers were supplied.
    #[error("Service IDs are required.")]
    MissingServiceIds,

    /// One of the service identifiers is empty or whitespace.
    #[error("Service ID at position {index} is blank.")]
    BlankServiceId { index: usize },

    /// Duration outside `1..=max`.
    #[error("Duration must be between 1 and {max} minutes (got {value}).")]
    DurationOutOfRange { value: i64, max: u32 },

    /// The requester email is required on this surface but absent.
    #[error("User email is required.")]
    MissingEmail,

    /// The requester email is not a syntactically valid address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Delete request without a maintenance window id.
    #[error("Maintenance window ID is required.")]
    MissingMaintenanceWindowId,
}

/// A create request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWindowRequest {
    pub service_ids: Vec<String>,
    /// `None` falls back to [`default_duration_minutes`].
    pub duration_minutes: Option<i64>,
    pub requester_email: Option<String>,
    /// Whether the calling surface insists on a requester email.
    pub email_required: bool,
}

/// A create request that passed [`validate_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreateRequest {
    pub service_ids: Vec<String>,
    pub duration_minutes: u32,
    pub requester_email: Option<String>,
}

/// A delete request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWindowRequest {
    pub maintenance_window_id: String,
    pub requester_email: Option<String>,
    /// Whether the calling surface insists on a requester email.
    pub email_required: bool,
}

/// A delete request that passed [`validate_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDeleteRequest {
    pub maintenance_window_id: String,
    pub requester_email: Option<String>,
}

/// Duration applied when the caller leaves it out, capped at the configured max.
#[must_use]
pub fn default_duration_minutes(max_duration_minutes: u32) -> i64 {
    DEFAULT_DURATION_MINUTES.min(i64::from(max_duration_minutes))
}

/// Validate a create request against `max_duration_minutes`.
///
/// Checks run in order and the first failure wins:
/// 1. at least one service id, none of them blank
/// 2. `1 <= duration_minutes <= max_duration_minutes`
/// 3. the requester email is present when required, and valid when present
pub fn validate_create(
    request: &CreateWindowRequest,
    max_duration_minutes: u32,
) -> Result<ValidCreateRequest, ValidationError> {
    if request.service_ids.is_empty() {
        return Err(ValidationError::MissingServiceIds);
    }
    if let Some(index) = request.service_ids.iter().position(|id| id.trim().is_empty()) {
        return Err(ValidationError::BlankServiceId { index });
    }

    let requested = request
        .duration_minutes
        .unwrap_or_else(|| default_duration_minutes(max_duration_minutes));
    let duration_minutes = u32::try_from(requested)
        .ok()
        .filter(|d| (1..=max_duration_minutes).contains(d))
        .ok_or(ValidationError::DurationOutOfRange {
            value: requested,
            max: max_duration_minutes,
        })?;

    check_email(request.requester_email.as_deref(), request.email_required)?;

    Ok(ValidCreateRequest {
        service_ids: request.service_ids.clone(),
        duration_minutes,
        requester_email: request.requester_email.clone(),
    })
}

/// Validate a delete request: the id first, then the requester email.
pub fn validate_delete(request: &DeleteWindowRequest) -> Result<ValidDeleteRequest, ValidationError> {
    let id = request.maintenance_window_id.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingMaintenanceWindowId);
    }
    check_email(request.requester_email.as_deref(), request.email_required)?;

    Ok(ValidDeleteRequest {
        maintenance_window_id: id.to_string(),
        requester_email: request.requester_email.clone(),
    })
}

/// Presence and syntax of the requester email; blank counts as absent.
fn check_email(email: Option<&str>, required: bool) -> Result<(), ValidationError> {
    match email.filter(|e| !e.trim().is_empty()) {
        Some(email) => validate_email(email),
        None if required => Err(ValidationError::MissingEmail),
        None => Ok(()),
    }
}

/// Check that `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() <= MAX_EMAIL_LEN && EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(ids: &[&str], duration: i64, email: Option<&str>) -> CreateWindowRequest {
        CreateWindowRequest {
            service_ids: ids.iter().map(ToString::to_string).collect(),
            duration_minutes: Some(duration),
            requester_email: email.map(String::from),
            email_required: false,
        }
    }

    #[test]
    fn test_accepts_every_duration_up_to_max() {
        for d in 1..=30 {
            let valid = validate_create(&create(&["PSVC1"], d, None), 30).unwrap();
            assert_eq!(i64::from(valid.duration_minutes), d);
        }
    }

    #[test]
    fn test_rejects_duration_out_of_range() {
        for d in [0, -1, -30, 31, 1_000, i64::MAX] {
            assert_eq!(
                validate_create(&create(&["PSVC1"], d, None), 30),
                Err(ValidationError::DurationOutOfRange { value: d, max: 30 })
            );
        }
    }

    #[test]
    fn test_configured_max_is_honoured() {
        assert!(validate_create(&create(&["PSVC1"], 45, None), 60).is_ok());
        assert!(validate_create(&create(&["PSVC1"], 61, None), 60).is_err());
    }

    #[test]
    fn test_missing_service_ids_wins_over_duration() {
        for d in [-5, 0, 15, 99] {
            assert_eq!(
                validate_create(&create(&[], d, Some("not-an-email")), 30),
                Err(ValidationError::MissingServiceIds)
            );
        }
    }

    #[test]
    fn test_blank_service_id_is_rejected() {
        assert_eq!(
            validate_create(&create(&["PSVC1", "  "], 10, None), 30),
            Err(ValidationError::BlankServiceId { index: 1 })
        );
    }

    #[test]
    fn test_email_checked_after_duration() {
        assert_eq!(
            validate_create(&create(&["PSVC1"], 0, Some("bad")), 30),
            Err(ValidationError::DurationOutOfRange { value: 0, max: 30 })
        );
        assert_eq!(
            validate_create(&create(&["PSVC1"], 10, Some("bad")), 30),
            Err(ValidationError::InvalidEmail("bad".to_string()))
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let good = create(&["PSVC1", "PSVC2"], 20, Some("ops@example.com"));
        assert_eq!(validate_create(&good, 30), validate_create(&good, 30));

        let bad = create(&["PSVC1"], 31, None);
        assert_eq!(validate_create(&bad, 30), validate_create(&bad, 30));
    }

    #[test]
    fn test_email_syntax() {
        for ok in ["ops@example.com", "first.last+tag@sub.example.co.uk", "a@b.io"] {
            assert!(validate_email(ok).is_ok(), "{ok} should be valid");
        }
        for bad in [
            "",
            "ops",
            "ops@",
            "@example.com",
            "ops@example",
            "ops@@example.com",
            "ops @example.com",
            "ops@-example.com",
        ] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn test_delete_requires_id() {
        let req = DeleteWindowRequest {
            maintenance_window_id: "   ".to_string(),
            requester_email: Some("ops@example.com".to_string()),
            email_required: true,
        };
        assert_eq!(
            validate_delete(&req),
            Err(ValidationError::MissingMaintenanceWindowId)
        );
    }

    #[test]
    fn test_delete_trims_id() {
        let req = DeleteWindowRequest {
            maintenance_window_id: " PW123 ".to_string(),
            requester_email: None,
            email_required: false,
        };
        assert_eq!(validate_delete(&req).unwrap().maintenance_window_id, "PW123");
    }

    #[test]
    fn test_default_duration_respects_max() {
        let mut req = create(&["PSVC1"], 0, None);
        req.duration_minutes = None;

        assert_eq!(validate_create(&req, 30).unwrap().duration_minutes, 30);
        assert_eq!(validate_create(&req, 60).unwrap().duration_minutes, 30);
        assert_eq!(validate_create(&req, 10).unwrap().duration_minutes, 10);
        assert_eq!(validate_create(&req, 1).unwrap().duration_minutes, 1);
    }

    #[test]
    fn test_missing_email_is_checked_last() {
        let mut req = create(&[], 15, None);
        req.email_required = true;
        assert_eq!(
            validate_create(&req, 30),
            Err(ValidationError::MissingServiceIds)
        );

        req.service_ids = vec!["PSVC1".to_string()];
        req.duration_minutes = Some(45);
        assert_eq!(
            validate_create(&req, 30),
            Err(ValidationError::DurationOutOfRange { value: 45, max: 30 })
        );

        req.duration_minutes = Some(15);
        assert_eq!(validate_create(&req, 30), Err(ValidationError::MissingEmail));

        req.requester_email = Some("   ".to_string());
        assert_eq!(validate_create(&req, 30), Err(ValidationError::MissingEmail));

        req.email_required = false;
        req.requester_email = None;
        assert!(validate_create(&req, 30).is_ok());
    }

    #[test]
    fn test_delete_checks_id_before_email() {
        let mut req = DeleteWindowRequest {
            maintenance_window_id: String::new(),
            requester_email: None,
            email_required: true,
        };
        assert_eq!(
            validate_delete(&req),
            Err(ValidationError::MissingMaintenanceWindowId)
        );

        req.maintenance_window_id = "PW123".to_string();
        assert_eq!(validate_delete(&req), Err(ValidationError::MissingEmail));
    }
}
