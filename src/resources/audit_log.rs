//! Read-only audit trail.
//!
//! `AuditLogEntry` implements only [`AdminResource`]; it has no active
//! model, no create/update payloads and no delete path. The mutating
//! handlers are generic over [`crate::resource::MutableAdminResource`], so
//! code that tried to mount them for this type would not compile; the
//! append-only property holds below the UI layer, for every role.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;
use crate::descriptor::{
    BadgeDomain, CellFormat, ColumnDef, FilterDescriptor, PageMap, ResourceDescriptor,
    SelectOption, SortDir, TableSchema,
};
use crate::entities::audit_log::{Column, Entity, Model};
use crate::entities::kinds::AuditAction;
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::AdminResource;

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub actor_name: String,
    pub actor_role: String,
    pub action: AuditAction,
    pub subject_model: String,
    pub subject_id: String,
    pub description: Option<String>,
    pub ip_address: Option<String>,
}

impl From<Model> for AuditLogEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            logged_at: model.logged_at,
            actor_name: model.actor_name,
            actor_role: model.actor_role,
            action: model.action,
            subject_model: model.subject_model,
            subject_id: model.subject_id,
            description: model.description,
            ip_address: model.ip_address,
        }
    }
}

fn action_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("created", "Created"),
        SelectOption::new("updated", "Updated"),
        SelectOption::new("deleted", "Deleted"),
        SelectOption::new("restored", "Restored"),
        SelectOption::new("logged_in", "Logged in"),
        SelectOption::new("logged_out", "Logged out"),
    ]
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: AuditLogEntry::RESOURCE_NAME_SINGULAR,
        name_plural: AuditLogEntry::RESOURCE_NAME_PLURAL,
        description: AuditLogEntry::RESOURCE_DESCRIPTION,
        read_only: true,
        required_role: Some(Role::Admin),
        pages: PageMap::new("/audit-log", "", "", "/audit-log/{id}"),
        form: None,
        table: TableSchema::new(
            vec![
                ColumnDef::new(
                    "logged_at",
                    "When",
                    CellFormat::DateTime {
                        pattern: "%d %b %Y %H:%M",
                    },
                )
                .sortable(),
                ColumnDef::new("actor_name", "Actor", CellFormat::Text).searchable(),
                ColumnDef::new("actor_role", "Role", CellFormat::Text),
                ColumnDef::new(
                    "action",
                    "Action",
                    CellFormat::Badge {
                        domain: BadgeDomain::AuditAction,
                    },
                ),
                ColumnDef::new("subject_model", "Subject", CellFormat::Text).searchable(),
                ColumnDef::new("subject_id", "Subject id", CellFormat::Text),
                ColumnDef::new("ip_address", "IP", CellFormat::Text),
            ],
            ("logged_at", SortDir::Desc),
        ),
        filters: vec![
            FilterDescriptor::new("logged_at", "Between", FilterKind::DateRange),
            FilterDescriptor::new("action", "Action", FilterKind::Select)
                .with_options(action_options()),
            FilterDescriptor::new("subject_model", "Subject", FilterKind::Equals),
        ],
        // Read-only: no create, no edit, no delete
        actions: vec![],
    }
}

#[async_trait]
impl AdminResource for AuditLogEntry {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "audit log entry";
    const RESOURCE_NAME_PLURAL: &'static str = "audit log entries";
    const TABLE_NAME: &'static str = "audit_log_entries";
    const RESOURCE_DESCRIPTION: &'static str = "Immutable trail of admin actions";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn required_role() -> Option<Role> {
        Some(Role::Admin)
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::LoggedAt
    }

    fn default_sort_column_name() -> &'static str {
        "logged_at"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("logged_at", Column::LoggedAt),
            ("actor_name", Column::ActorName),
            ("action", Column::Action),
        ]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("logged_at", Column::LoggedAt, FilterKind::DateRange),
            FilterBinding::new("action", Column::Action, FilterKind::Select),
            FilterBinding::new("subject_model", Column::SubjectModel, FilterKind::Equals),
        ]
    }

    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("actor_name", Column::ActorName),
            ("subject_model", Column::SubjectModel),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_is_read_only_with_no_actions_and_no_form() {
        let descriptor = <AuditLogEntry as AdminResource>::descriptor();
        assert!(descriptor.read_only);
        assert!(descriptor.form.is_none());
        assert!(descriptor.actions.is_empty());
    }
}
