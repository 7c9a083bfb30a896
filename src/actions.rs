//! Guarded mutating actions.
//!
//! A guard is a read-only precondition checked before a mutation. The
//! compositions in this module run the check phase to completion before the
//! apply phase ever starts: a single delete never reaches the store when its
//! guard fails, and a bulk delete aborts the entire batch on the first
//! violation with zero rows changed.
//!
//! Handlers call [`guarded_delete`] / [`guarded_delete_many`] instead of the
//! resource's `delete` methods directly, so an unguarded apply is not
//! reachable from the HTTP surface.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::AdminError;
use crate::notify::Notification;
use crate::resource::MutableAdminResource;

/// A vetoed precondition on a mutating action.
#[derive(Debug, Clone)]
pub struct GuardViolation {
    /// Singular resource name, for the notification title.
    pub resource: &'static str,
    /// User-facing reason the action was vetoed.
    pub reason: String,
}

impl GuardViolation {
    #[must_use]
    pub fn new(resource: &'static str, reason: impl Into<String>) -> Self {
        Self {
            resource,
            reason: reason.into(),
        }
    }

    /// The danger notification surfaced on the UI feedback channel.
    #[must_use]
    pub fn notification(&self) -> Notification {
        Notification::danger(format!("Cannot delete {}", self.resource), self.reason.clone())
    }
}

impl std::fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.resource, self.reason)
    }
}

impl std::error::Error for GuardViolation {}

/// Check, then apply, a single-record delete.
///
/// # Errors
///
/// Returns the guard's veto as a 409 [`AdminError::Guard`], or the
/// persistence failure from the apply phase.
pub async fn guarded_delete<R>(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, AdminError>
where
    R: MutableAdminResource,
    <<R as crate::resource::AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    R::delete_guard(db, id).await?;
    R::delete(db, id).await.map_err(AdminError::from)
}

/// Check every record, then apply the batch delete.
///
/// The apply phase only runs once all guards have passed; a veto anywhere in
/// the batch aborts the whole action before any row is touched.
///
/// # Errors
///
/// Returns the first guard veto as a 409 [`AdminError::Guard`], or the
/// persistence failure from the apply phase.
pub async fn guarded_delete_many<R>(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<Uuid>, AdminError>
where
    R: MutableAdminResource,
    <<R as crate::resource::AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    for id in &ids {
        R::delete_guard(db, *id).await?;
    }
    R::delete_many(db, ids).await.map_err(AdminError::from)
}
