//! Transient UI feedback messages.
//!
//! The notification channel itself is external; this crate only produces
//! `(severity, title, body)` triples in response payloads, primarily after a
//! guarded action is vetoed.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// A message for the host UI to display once.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn danger(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Danger, title, body)
    }

    #[must_use]
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, body)
    }

    #[must_use]
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, body)
    }
}
