//! Employee work calendars. The creator column is a hidden field filled
//! from the acting identity.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue::Set, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::ActorContext;
use crate::descriptor::{
    ActionDescriptor, BadgeDomain, CellFormat, ColumnDef, FieldDef, FilterDescriptor, FormSchema,
    HiddenDefault, PageMap, ResourceDescriptor, SelectOption, SortDir, TableSchema, Widget,
};
use crate::entities::kinds::ShiftKind;
use crate::entities::work_calendar::{ActiveModel, Column, Entity, Model};
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationErrors, validators};

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WorkCalendarEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub unit: String,
    pub note: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for WorkCalendarEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            date: model.date,
            shift: model.shift,
            unit: model.unit,
            note: model.note,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// The creator is deliberately absent here; it comes from the actor context.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct WorkCalendarEntryCreate {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub unit: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<WorkCalendarEntryCreate> for ActiveModel {
    fn from(create: WorkCalendarEntryCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            employee_id: Set(create.employee_id),
            date: Set(create.date),
            shift: Set(create.shift),
            unit: Set(create.unit),
            note: Set(create.note),
            // Filled by apply_actor_defaults before insert
            created_by: sea_orm::ActiveValue::NotSet,
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

impl Validatable for WorkCalendarEntryCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("unit", &self.unit));
        errors.check(validators::validate_length("unit", &self.unit, None, Some(80)));
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct WorkCalendarEntryUpdate {
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub shift: Option<ShiftKind>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for WorkCalendarEntryUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(employee_id) = self.employee_id {
            existing.employee_id = Set(employee_id);
        }
        if let Some(date) = self.date {
            existing.date = Set(date);
        }
        if let Some(shift) = self.shift {
            existing.shift = Set(shift);
        }
        if let Some(unit) = self.unit {
            existing.unit = Set(unit);
        }
        if let Some(note) = self.note {
            existing.note = Set(Some(note));
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl Validatable for WorkCalendarEntryUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(unit) = &self.unit {
            errors.check(validators::validate_required("unit", unit));
            errors.check(validators::validate_length("unit", unit, None, Some(80)));
        }
        errors.into_result()
    }
}

fn shift_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("morning", "Morning"),
        SelectOption::new("afternoon", "Afternoon"),
        SelectOption::new("night", "Night"),
        SelectOption::new("off", "Off"),
    ]
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: WorkCalendarEntry::RESOURCE_NAME_SINGULAR,
        name_plural: WorkCalendarEntry::RESOURCE_NAME_PLURAL,
        description: WorkCalendarEntry::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: None,
        pages: PageMap::new(
            "/work-calendar",
            "/work-calendar/new",
            "/work-calendar/{id}/edit",
            "/work-calendar/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required(
                "employee_id",
                "Employee",
                Widget::select_relation("employees", "name"),
            ),
            FieldDef::required("date", "Date", Widget::Date),
            FieldDef::required("shift", "Shift", Widget::select_static(shift_options())),
            FieldDef::required("unit", "Unit", Widget::text_with_max(80)),
            FieldDef::optional("note", "Note", Widget::TextArea { rows: 2 }),
            FieldDef::optional(
                "created_by",
                "Created by",
                Widget::Hidden {
                    default: HiddenDefault::CurrentActor,
                },
            )
            .read_only(),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new("date", "Date", CellFormat::Date { pattern: "%d %b %Y" })
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
                    "shift",
                    "Shift",
                    CellFormat::Badge {
                        domain: BadgeDomain::Shift,
                    },
                ),
                ColumnDef::new("unit", "Unit", CellFormat::Text).searchable(),
            ],
            ("date", SortDir::Desc),
        ),
        filters: vec![
            FilterDescriptor::new("date", "Between", FilterKind::DateRange),
            FilterDescriptor::new("shift", "Shift", FilterKind::Select)
                .with_options(shift_options()),
            FilterDescriptor::new("employee_id", "Employee", FilterKind::Equals),
        ],
        actions: vec![
            ActionDescriptor::new("delete", "Delete").with_confirm("Delete this entry?"),
            ActionDescriptor::new("delete", "Delete selected").bulk(),
        ],
    }
}

#[async_trait]
impl AdminResource for WorkCalendarEntry {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "work calendar entry";
    const RESOURCE_NAME_PLURAL: &'static str = "work calendar entries";
    const TABLE_NAME: &'static str = "work_calendar_entries";
    const RESOURCE_DESCRIPTION: &'static str = "Daily shift assignments per employee";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::Date
    }

    fn default_sort_column_name() -> &'static str {
        "date"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("date", Column::Date), ("unit", Column::Unit)]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("date", Column::Date, FilterKind::DateRange),
            FilterBinding::new("shift", Column::Shift, FilterKind::Select),
            FilterBinding::new("employee_id", Column::EmployeeId, FilterKind::Equals),
        ]
    }

    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("unit", Column::Unit)]
    }
}

#[async_trait]
impl MutableAdminResource for WorkCalendarEntry {
    type ActiveModelType = ActiveModel;
    type CreateModel = WorkCalendarEntryCreate;
    type UpdateModel = WorkCalendarEntryUpdate;

    fn apply_actor_defaults(model: &mut ActiveModel, actor: &ActorContext) {
        model.created_by = Set(actor.actor_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use sea_orm::ActiveValue;

    #[test]
    fn creator_comes_from_actor_context() {
        let create = WorkCalendarEntryCreate {
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            shift: ShiftKind::Night,
            unit: "IGD".to_string(),
            note: None,
        };
        let mut model: ActiveModel = create.into();
        assert!(matches!(model.created_by, ActiveValue::NotSet));

        let actor = ActorContext::new(Uuid::new_v4(), "admin", vec![Role::Admin]);
        WorkCalendarEntry::apply_actor_defaults(&mut model, &actor);
        match model.created_by {
            ActiveValue::Set(id) => assert_eq!(id, actor.actor_id),
            _ => panic!("created_by not filled from the actor context"),
        }
    }

    #[test]
    fn empty_unit_is_rejected() {
        let create = WorkCalendarEntryCreate {
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            shift: ShiftKind::Morning,
            unit: "  ".to_string(),
            note: None,
        };
        assert!(create.validate().is_err());
    }
}
