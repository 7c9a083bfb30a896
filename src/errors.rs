//! Error handling for the admin API.
//!
//! Internal failures are logged with `tracing` and never leak to clients;
//! responses carry a sanitized message, field details for validation
//! failures, and a [`Notification`] for vetoed guarded actions so the UI
//! feedback channel can display it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

use crate::actions::GuardViolation;
use crate::notify::Notification;
use crate::validation::{ValidationError, ValidationErrors};

/// Error taxonomy of the admin layer.
///
/// Every failure is terminal for the triggering request; there is no retry
/// path anywhere in this crate.
#[derive(Debug)]
pub enum AdminError {
    /// 404 - record or resource does not exist (or is soft-deleted).
    NotFound {
        resource: String,
        id: Option<String>,
    },

    /// 422 - the submitted form is invalid; nothing was persisted.
    Validation { errors: Vec<ValidationError> },

    /// 409 - a guard vetoed the mutation; no partial state change occurred.
    Guard { violation: GuardViolation },

    /// 403 - the acting identity lacks the required role; no operation was
    /// attempted.
    Forbidden { message: String },

    /// 409 - uniqueness or similar constraint conflict.
    Conflict { message: String },

    /// 500 - persistence failure; details logged, not exposed.
    Database { message: String, internal: DbErr },
}

impl AdminError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation {
            errors: errors.errors().to_vec(),
        }
    }

    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Guard { .. } | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => id.as_ref().map_or_else(
                || format!("{resource} not found"),
                |id| format!("{resource} with ID '{id}' not found"),
            ),
            Self::Validation { errors } => {
                if errors.len() == 1 {
                    errors[0].to_string()
                } else {
                    "Validation failed".to_string()
                }
            }
            Self::Guard { violation } => violation.reason.clone(),
            Self::Forbidden { message } | Self::Conflict { message } => message.clone(),
            Self::Database { message, .. } => message.clone(),
        }
    }

    /// The notification to push onto the UI feedback channel, if any.
    fn notification(&self) -> Option<Notification> {
        match self {
            Self::Guard { violation } => Some(violation.notification()),
            _ => None,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Guard { violation } => {
                tracing::warn!(
                    resource = violation.resource,
                    reason = %violation.reason,
                    "Guarded action vetoed"
                );
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Admin API error"
                );
            }
        }
    }
}

/// Response body sent to clients (sanitized).
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<Notification>,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = match &self {
            Self::Validation { errors } => ErrorBody {
                error: "Validation failed".to_string(),
                details: Some(errors.iter().map(ToString::to_string).collect()),
                notification: None,
            },
            _ => ErrorBody {
                error: self.user_message(),
                details: None,
                notification: self.notification(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for AdminError {}

impl From<GuardViolation> for AdminError {
    fn from(violation: GuardViolation) -> Self {
        Self::Guard { violation }
    }
}

impl From<ValidationErrors> for AdminError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors)
    }
}

/// `RecordNotFound` maps to 404, unique-constraint violations to 409,
/// everything else to a sanitized 500.
impl From<DbErr> for AdminError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            let resource = msg.split_whitespace().next().unwrap_or("Record");
            return Self::NotFound {
                resource: resource.to_string(),
                id: None,
            };
        }
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::Conflict {
                message: "A record with the same unique value already exists".to_string(),
            };
        }
        Self::database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[test]
    fn not_found_with_id() {
        let err = AdminError::not_found("Patient", Some("123".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Patient with ID '123' not found");
    }

    #[test]
    fn not_found_without_id() {
        let err = AdminError::not_found("Patient", None);
        assert_eq!(err.user_message(), "Patient not found");
    }

    #[test]
    fn validation_maps_to_422() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("name", "This field is required"));
        let err = AdminError::validation(errors);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.user_message(), "name: This field is required");
    }

    #[test]
    fn guard_violation_maps_to_409_with_danger_notification() {
        let violation = GuardViolation::new("leave type", "2 pending leave requests exist");
        let err = AdminError::from(violation);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let notification = err.notification().expect("guard errors carry a notification");
        assert_eq!(notification.severity, Severity::Danger);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = AdminError::forbidden("Requires the admin role");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn record_not_found_dberr_maps_to_404() {
        let err: AdminError = DbErr::RecordNotFound("patient not found".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_dberr_maps_to_sanitized_500() {
        let err: AdminError = DbErr::Type("bad column".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
    }
}
