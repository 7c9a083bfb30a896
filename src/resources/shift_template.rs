//! Shift templates: named start/end times.

use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::{ActiveValue::Set, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;
use crate::descriptor::{
    ActionDescriptor, CellFormat, ColumnDef, FieldDef, FormSchema, PageMap, ResourceDescriptor,
    SortDir, TableSchema, Widget,
};
use crate::entities::shift_template::{ActiveModel, Column, Entity, Model};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationError, ValidationErrors, validators};

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShiftTemplate {
    pub id: Uuid,
    pub name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

impl From<Model> for ShiftTemplate {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct ShiftTemplateCreate {
    pub name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

impl From<ShiftTemplateCreate> for ActiveModel {
    fn from(create: ShiftTemplateCreate) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(create.name),
            starts_at: Set(create.starts_at),
            ends_at: Set(create.ends_at),
        }
    }
}

impl Validatable for ShiftTemplateCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("name", &self.name));
        errors.check(validators::validate_length("name", &self.name, None, Some(80)));
        // Overnight shifts (ends_at before starts_at) are legitimate; only
        // a zero-length shift is nonsense.
        if self.starts_at == self.ends_at {
            errors.add(ValidationError::new("ends_at", "Shift cannot have zero length"));
        }
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShiftTemplateUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub starts_at: Option<NaiveTime>,
    #[serde(default)]
    pub ends_at: Option<NaiveTime>,
}

impl MergeIntoActiveModel<ActiveModel> for ShiftTemplateUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = Set(name);
        }
        if let Some(starts_at) = self.starts_at {
            existing.starts_at = Set(starts_at);
        }
        if let Some(ends_at) = self.ends_at {
            existing.ends_at = Set(ends_at);
        }
        Ok(existing)
    }
}

impl Validatable for ShiftTemplateUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(validators::validate_required("name", name));
        }
        errors.into_result()
    }
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: ShiftTemplate::RESOURCE_NAME_SINGULAR,
        name_plural: ShiftTemplate::RESOURCE_NAME_PLURAL,
        description: ShiftTemplate::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: Some(Role::Admin),
        pages: PageMap::new(
            "/shift-templates",
            "/shift-templates/new",
            "/shift-templates/{id}/edit",
            "/shift-templates/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required("name", "Name", Widget::text_with_max(80)),
            FieldDef::required("starts_at", "Starts", Widget::Time),
            FieldDef::required("ends_at", "Ends", Widget::Time),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new("name", "Name", CellFormat::Text).sortable().searchable(),
                ColumnDef::new("starts_at", "Starts", CellFormat::Time),
                ColumnDef::new("ends_at", "Ends", CellFormat::Time),
            ],
            ("name", SortDir::Asc),
        ),
        filters: vec![],
        actions: vec![
            ActionDescriptor::new("delete", "Delete").with_confirm("Delete this template?"),
            ActionDescriptor::new("delete", "Delete selected").bulk(),
        ],
    }
}

#[async_trait]
impl AdminResource for ShiftTemplate {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "shift template";
    const RESOURCE_NAME_PLURAL: &'static str = "shift templates";
    const TABLE_NAME: &'static str = "shift_templates";
    const RESOURCE_DESCRIPTION: &'static str = "Named shift start and end times";

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
        vec![("name", Column::Name), ("starts_at", Column::StartsAt)]
    }

    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("name", Column::Name)]
    }
}

#[async_trait]
impl MutableAdminResource for ShiftTemplate {
    type ActiveModelType = ActiveModel;
    type CreateModel = ShiftTemplateCreate;
    type UpdateModel = ShiftTemplateUpdate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overnight_shift_is_allowed() {
        let create = ShiftTemplateCreate {
            name: "Night".to_string(),
            starts_at: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        };
        assert!(create.validate().is_ok());
    }

    #[test]
    fn zero_length_shift_is_rejected() {
        let create = ShiftTemplateCreate {
            name: "Broken".to_string(),
            starts_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        };
        assert!(create.validate().is_err());
    }
}
