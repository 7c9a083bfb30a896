//! Leave types. Deletion is guarded: a leave type with pending leave
//! requests cannot be removed, singly or in bulk.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::actions::GuardViolation;
use crate::auth::Role;
use crate::descriptor::{
    ActionDescriptor, CellFormat, ColumnDef, FieldDef, FilterDescriptor, FormSchema, PageMap,
    ResourceDescriptor, SortDir, TableSchema, Widget,
};
use crate::entities::kinds::LeaveStatus;
use crate::entities::leave_request;
use crate::entities::leave_type::{ActiveModel, Column, Entity, Model};
use crate::errors::AdminError;
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationErrors, validators};

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LeaveType {
    pub id: Uuid,
    pub name: String,
    pub allocation_days: Option<i32>,
    pub active: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for LeaveType {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            allocation_days: model.allocation_days,
            active: model.active,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct LeaveTypeCreate {
    pub name: String,
    #[serde(default)]
    pub allocation_days: Option<i32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

const fn default_active() -> bool {
    true
}

impl From<LeaveTypeCreate> for ActiveModel {
    fn from(create: LeaveTypeCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(create.name),
            allocation_days: Set(create.allocation_days),
            active: Set(create.active),
            description: Set(create.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

impl Validatable for LeaveTypeCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("name", &self.name));
        errors.check(validators::validate_length("name", &self.name, None, Some(100)));
        if let Some(days) = self.allocation_days {
            errors.check(validators::validate_range("allocation_days", days, Some(1), Some(365)));
        }
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct LeaveTypeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub allocation_days: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for LeaveTypeUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = Set(name);
        }
        if let Some(allocation_days) = self.allocation_days {
            existing.allocation_days = Set(Some(allocation_days));
        }
        if let Some(active) = self.active {
            existing.active = Set(active);
        }
        if let Some(description) = self.description {
            existing.description = Set(Some(description));
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl Validatable for LeaveTypeUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(validators::validate_required("name", name));
            errors.check(validators::validate_length("name", name, None, Some(100)));
        }
        if let Some(days) = self.allocation_days {
            errors.check(validators::validate_range("allocation_days", days, Some(1), Some(365)));
        }
        errors.into_result()
    }
}

/// Pending requests referencing the leave type veto its deletion.
async fn pending_requests(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
    leave_request::Entity::find()
        .filter(leave_request::Column::LeaveTypeId.eq(id))
        .filter(leave_request::Column::Status.eq(LeaveStatus::Pending))
        .count(db)
        .await
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: LeaveType::RESOURCE_NAME_SINGULAR,
        name_plural: LeaveType::RESOURCE_NAME_PLURAL,
        description: LeaveType::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: Some(Role::Admin),
        pages: PageMap::new(
            "/leave-types",
            "/leave-types/new",
            "/leave-types/{id}/edit",
            "/leave-types/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required("name", "Name", Widget::text_with_max(100)),
            FieldDef::optional(
                "allocation_days",
                "Days per year",
                Widget::Number {
                    min: Some(1),
                    max: Some(365),
                },
            )
            .with_help("Leave empty for unallocated leave types"),
            FieldDef::required("active", "Active", Widget::Toggle),
            FieldDef::optional("description", "Description", Widget::TextArea { rows: 3 }),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new("name", "Name", CellFormat::Text).sortable().searchable(),
                ColumnDef::new("allocation_days", "Days/year", CellFormat::Text).sortable(),
                ColumnDef::new("active", "Active", CellFormat::Toggle),
            ],
            ("name", SortDir::Asc),
        ),
        filters: vec![
            FilterDescriptor::new("active", "Active", FilterKind::Ternary),
            FilterDescriptor::new("has_allocation", "Has allocation", FilterKind::Existence),
        ],
        actions: vec![
            ActionDescriptor::new("delete", "Delete")
                .guarded()
                .with_confirm("Delete this leave type?"),
            ActionDescriptor::new("delete", "Delete selected").bulk().guarded(),
        ],
    }
}

#[async_trait]
impl AdminResource for LeaveType {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "leave type";
    const RESOURCE_NAME_PLURAL: &'static str = "leave types";
    const TABLE_NAME: &'static str = "leave_types";
    const RESOURCE_DESCRIPTION: &'static str =
        "Leave categories with their yearly day allocations";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn required_role() -> Option<Role> {
        Some(Role::Admin)
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::Name
    }

    fn default_sort_column_name() -> &'static str {
        "name"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("name", Column::Name),
            ("allocation_days", Column::AllocationDays),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("active", Column::Active, FilterKind::Ternary),
            FilterBinding::new("has_allocation", Column::AllocationDays, FilterKind::Existence),
        ]
    }

    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("name", Column::Name)]
    }
}

#[async_trait]
impl MutableAdminResource for LeaveType {
    type ActiveModelType = ActiveModel;
    type CreateModel = LeaveTypeCreate;
    type UpdateModel = LeaveTypeUpdate;

    async fn delete_guard(db: &DatabaseConnection, id: Uuid) -> Result<(), AdminError> {
        let pending = pending_requests(db, id).await.map_err(AdminError::database)?;
        if pending > 0 {
            return Err(GuardViolation::new(
                Self::RESOURCE_NAME_SINGULAR,
                format!("{pending} pending leave request(s) still reference it"),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_outside_range_is_rejected() {
        let create = LeaveTypeCreate {
            name: "Cuti Tahunan".to_string(),
            allocation_days: Some(400),
            active: true,
            description: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn allocation_is_optional() {
        let create = LeaveTypeCreate {
            name: "Cuti Tanpa Gaji".to_string(),
            allocation_days: None,
            active: true,
            description: None,
        };
        assert!(create.validate().is_ok());
    }

    #[test]
    fn delete_actions_are_marked_guarded() {
        let descriptor = <LeaveType as AdminResource>::descriptor();
        assert!(descriptor.actions.iter().all(|a| a.guarded));
    }
}
