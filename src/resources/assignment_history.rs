//! Work-location assignment history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{ActorContext, Role};
use crate::descriptor::{
    ActionDescriptor, CellFormat, ColumnDef, FieldDef, FilterDescriptor, FormSchema,
    HiddenDefault, PageMap, ResourceDescriptor, SelectOption, SortDir, TableSchema, Widget,
};
use crate::entities::assignment_history::{ActiveModel, Column, Entity, Model};
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationError, ValidationErrors};

const METHODS: [&str; 3] = ["manual", "rotation", "scored"];

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssignmentHistoryEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_location_id: Uuid,
    pub previous_location_id: Option<Uuid>,
    pub assigned_by: Uuid,
    pub method: String,
    pub reasons: Option<String>,
    pub score: Option<i32>,
    pub metadata: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for AssignmentHistoryEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            work_location_id: model.work_location_id,
            previous_location_id: model.previous_location_id,
            assigned_by: model.assigned_by,
            method: model.method,
            reasons: model.reasons,
            score: model.score,
            metadata: model.metadata,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

/// `assigned_by` is absent on purpose; it comes from the actor context.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct AssignmentHistoryEntryCreate {
    pub employee_id: Uuid,
    pub work_location_id: Uuid,
    #[serde(default)]
    pub previous_location_id: Option<Uuid>,
    pub method: String,
    #[serde(default)]
    pub reasons: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AssignmentHistoryEntryCreate> for ActiveModel {
    fn from(create: AssignmentHistoryEntryCreate) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            employee_id: Set(create.employee_id),
            work_location_id: Set(create.work_location_id),
            previous_location_id: Set(create.previous_location_id),
            assigned_by: sea_orm::ActiveValue::NotSet,
            method: Set(create.method),
            reasons: Set(create.reasons),
            score: Set(create.score),
            metadata: Set(create.metadata),
            notes: Set(create.notes),
            created_at: Set(Utc::now()),
        }
    }
}

impl Validatable for AssignmentHistoryEntryCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !METHODS.contains(&self.method.as_str()) {
            errors.add(ValidationError::new(
                "method",
                "Must be 'manual', 'rotation' or 'scored'",
            ));
        }
        if self.previous_location_id == Some(self.work_location_id) {
            errors.add(ValidationError::new(
                "previous_location_id",
                "Previous and current location must differ",
            ));
        }
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct AssignmentHistoryEntryUpdate {
    #[serde(default)]
    pub reasons: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for AssignmentHistoryEntryUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(reasons) = self.reasons {
            existing.reasons = Set(Some(reasons));
        }
        if let Some(score) = self.score {
            existing.score = Set(Some(score));
        }
        if let Some(notes) = self.notes {
            existing.notes = Set(Some(notes));
        }
        Ok(existing)
    }
}

impl Validatable for AssignmentHistoryEntryUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

fn method_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("manual", "Manual"),
        SelectOption::new("rotation", "Rotation"),
        SelectOption::new("scored", "Scored"),
    ]
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: AssignmentHistoryEntry::RESOURCE_NAME_SINGULAR,
        name_plural: AssignmentHistoryEntry::RESOURCE_NAME_PLURAL,
        description: AssignmentHistoryEntry::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: Some(Role::Admin),
        pages: PageMap::new(
            "/assignment-history",
            "/assignment-history/new",
            "/assignment-history/{id}/edit",
            "/assignment-history/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required(
                "employee_id",
                "Employee",
                Widget::select_relation("employees", "name"),
            ),
            FieldDef::required(
                "work_location_id",
                "New location",
                Widget::select_relation("work-locations", "name"),
            ),
            FieldDef::optional(
                "previous_location_id",
                "Previous location",
                Widget::select_relation("work-locations", "name"),
            ),
            FieldDef::required("method", "Method", Widget::select_static(method_options())),
            FieldDef::optional("reasons", "Reasons", Widget::TextArea { rows: 3 }),
            FieldDef::optional("score", "Score", Widget::Number { min: Some(0), max: Some(100) }),
            FieldDef::optional("notes", "Notes", Widget::TextArea { rows: 2 }),
            FieldDef::optional(
                "assigned_by",
                "Assigned by",
                Widget::Hidden {
                    default: HiddenDefault::CurrentActor,
                },
            )
            .read_only(),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new(
                    "created_at",
                    "When",
                    CellFormat::DateTime {
                        pattern: "%d %b %Y %H:%M",
                    },
                )
                .sortable(),
                ColumnDef::new(
                    "employee_id",
                    "Employee",
                    CellFormat::Relation {
                        resource: "employees",
                        label_field: "name",
                    },
                ),
                ColumnDef::new(
                    "work_location_id",
                    "Location",
                    CellFormat::Relation {
                        resource: "work-locations",
                        label_field: "name",
                    },
                ),
                ColumnDef::new("method", "Method", CellFormat::Text),
                ColumnDef::new("score", "Score", CellFormat::Text).sortable(),
            ],
            ("created_at", SortDir::Desc),
        ),
        filters: vec![
            FilterDescriptor::new("created_at", "Between", FilterKind::DateRange),
            FilterDescriptor::new("method", "Method", FilterKind::Select)
                .with_options(method_options()),
            FilterDescriptor::new("employee_id", "Employee", FilterKind::Equals),
        ],
        actions: vec![
            ActionDescriptor::new("delete", "Delete").with_confirm("Delete this entry?"),
        ],
    }
}

#[async_trait]
impl AdminResource for AssignmentHistoryEntry {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "assignment history entry";
    const RESOURCE_NAME_PLURAL: &'static str = "assignment history entries";
    const TABLE_NAME: &'static str = "assignment_history_entries";
    const RESOURCE_DESCRIPTION: &'static str =
        "History of employee assignments between work locations";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn required_role() -> Option<Role> {
        Some(Role::Admin)
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::CreatedAt
    }

    fn default_sort_column_name() -> &'static str {
        "created_at"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("created_at", Column::CreatedAt),
            ("method", Column::Method),
            ("score", Column::Score),
        ]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("created_at", Column::CreatedAt, FilterKind::DateRange),
            FilterBinding::new("method", Column::Method, FilterKind::Select),
            FilterBinding::new("employee_id", Column::EmployeeId, FilterKind::Equals),
        ]
    }
}

#[async_trait]
impl MutableAdminResource for AssignmentHistoryEntry {
    type ActiveModelType = ActiveModel;
    type CreateModel = AssignmentHistoryEntryCreate;
    type UpdateModel = AssignmentHistoryEntryUpdate;

    fn apply_actor_defaults(model: &mut ActiveModel, actor: &ActorContext) {
        model.assigned_by = Set(actor.actor_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_previous_and_current_location_is_rejected() {
        let location = Uuid::new_v4();
        let create = AssignmentHistoryEntryCreate {
            employee_id: Uuid::new_v4(),
            work_location_id: location,
            previous_location_id: Some(location),
            method: "manual".to_string(),
            reasons: None,
            score: None,
            metadata: None,
            notes: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let create = AssignmentHistoryEntryCreate {
            employee_id: Uuid::new_v4(),
            work_location_id: Uuid::new_v4(),
            previous_location_id: None,
            method: "coin-flip".to_string(),
            reasons: None,
            score: None,
            metadata: None,
            notes: None,
        };
        assert!(create.validate().is_err());
    }
}
