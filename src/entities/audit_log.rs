use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use super::kinds::AuditAction;

/// Append-only audit trail. Rows are inserted by external logging
/// collaborators; the admin layer only ever reads them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_log_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub actor_name: String,
    pub actor_role: String,
    pub action: AuditAction,
    pub subject_model: String,
    pub subject_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
