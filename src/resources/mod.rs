//! Concrete resource definitions for the clinic admin panel.
//!
//! Each module binds one entity to its form, table, filters, actions and
//! pages, and implements the resource traits. [`admin_router`] mounts the
//! whole panel.

pub mod assignment_history;
pub mod audit_log;
pub mod leave_type;
pub mod patient;
pub mod procedure;
pub mod shift_template;
pub mod work_calendar;

pub use assignment_history::AssignmentHistoryEntry;
pub use audit_log::AuditLogEntry;
pub use leave_type::LeaveType;
pub use patient::Patient;
pub use procedure::Procedure;
pub use shift_template::ShiftTemplate;
pub use work_calendar::WorkCalendarEntry;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::handlers::{crud_router, read_only_router};

/// Router covering every resource of the panel. The audit log is mounted
/// through [`read_only_router`]; its type implements only the read side, so
/// no mutating route can exist for it.
#[must_use]
pub fn admin_router(db: DatabaseConnection) -> Router {
    Router::new()
        .nest("/patients", crud_router::<Patient>())
        .nest("/procedures", crud_router::<Procedure>())
        .nest("/work-calendar", crud_router::<WorkCalendarEntry>())
        .nest("/shift-templates", crud_router::<ShiftTemplate>())
        .nest("/leave-types", crud_router::<LeaveType>())
        .nest("/assignment-history", crud_router::<AssignmentHistoryEntry>())
        .nest("/audit-log", read_only_router::<AuditLogEntry>())
        .with_state(db)
}
