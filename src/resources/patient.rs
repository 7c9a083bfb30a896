//! Patient records: demographics, soft-deletable.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue::Set, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::descriptor::{
    ActionDescriptor, CellFormat, ColumnDef, FieldDef, FilterDescriptor, FormSchema, PageMap,
    ResourceDescriptor, SelectOption, SortDir, TableSchema, Widget,
};
use crate::entities::patient::{ActiveModel, Column, Entity, Model};
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationError, ValidationErrors, validators};

const SEXES: [&str; 2] = ["male", "female"];

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: Uuid,
    pub record_number: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Patient {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            record_number: model.record_number,
            name: model.name,
            date_of_birth: model.date_of_birth,
            sex: model.sex,
            address: model.address,
            phone: model.phone,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct PatientCreate {
    pub record_number: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<PatientCreate> for ActiveModel {
    fn from(create: PatientCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            record_number: Set(create.record_number),
            name: Set(create.name),
            date_of_birth: Set(create.date_of_birth),
            sex: Set(create.sex),
            address: Set(create.address),
            phone: Set(create.phone),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Validatable for PatientCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("record_number", &self.record_number));
        errors.check(validators::validate_required("name", &self.name));
        errors.check(validators::validate_length("name", &self.name, None, Some(150)));
        if !SEXES.contains(&self.sex.as_str()) {
            errors.add(ValidationError::new("sex", "Must be 'male' or 'female'"));
        }
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PatientUpdate {
    #[serde(default)]
    pub record_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for PatientUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(record_number) = self.record_number {
            existing.record_number = Set(record_number);
        }
        if let Some(name) = self.name {
            existing.name = Set(name);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            existing.date_of_birth = Set(date_of_birth);
        }
        if let Some(sex) = self.sex {
            existing.sex = Set(sex);
        }
        if let Some(address) = self.address {
            existing.address = Set(Some(address));
        }
        if let Some(phone) = self.phone {
            existing.phone = Set(Some(phone));
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl Validatable for PatientUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(validators::validate_required("name", name));
            errors.check(validators::validate_length("name", name, None, Some(150)));
        }
        if let Some(sex) = &self.sex
            && !SEXES.contains(&sex.as_str())
        {
            errors.add(ValidationError::new("sex", "Must be 'male' or 'female'"));
        }
        errors.into_result()
    }
}

fn descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        name_singular: Patient::RESOURCE_NAME_SINGULAR,
        name_plural: Patient::RESOURCE_NAME_PLURAL,
        description: Patient::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: None,
        pages: PageMap::new(
            "/patients",
            "/patients/new",
            "/patients/{id}/edit",
            "/patients/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required("record_number", "Medical record no.", Widget::text_with_max(32)),
            FieldDef::required("name", "Full name", Widget::text_with_max(150)),
            FieldDef::required("date_of_birth", "Date of birth", Widget::Date),
            FieldDef::required(
                "sex",
                "Sex",
                Widget::select_static(vec![
                    SelectOption::new("male", "Male"),
                    SelectOption::new("female", "Female"),
                ]),
            ),
            FieldDef::optional("address", "Address", Widget::TextArea { rows: 3 }),
            FieldDef::optional("phone", "Phone", Widget::text_with_max(32)),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new("record_number", "Record no.", CellFormat::Text)
                    .sortable()
                    .searchable(),
                ColumnDef::new("name", "Name", CellFormat::Text)
                    .sortable()
                    .searchable(),
                ColumnDef::new(
                    "date_of_birth",
                    "Born",
                    CellFormat::Date { pattern: "%d %b %Y" },
                )
                .sortable(),
                ColumnDef::new("sex", "Sex", CellFormat::Text),
                ColumnDef::new("phone", "Phone", CellFormat::Text),
            ],
            ("name", SortDir::Asc),
        ),
        filters: vec![
            FilterDescriptor::new("sex", "Sex", FilterKind::Select).with_options(vec![
                SelectOption::new("male", "Male"),
                SelectOption::new("female", "Female"),
            ]),
            FilterDescriptor::new("date_of_birth", "Born between", FilterKind::DateRange),
        ],
        actions: vec![
            ActionDescriptor::new("delete", "Delete").with_confirm("Delete this patient?"),
            ActionDescriptor::new("delete", "Delete selected").bulk(),
        ],
    }
}

#[async_trait]
impl AdminResource for Patient {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "patient";
    const RESOURCE_NAME_PLURAL: &'static str = "patients";
    const TABLE_NAME: &'static str = "patients";
    const RESOURCE_DESCRIPTION: &'static str =
        "Registered patients and their demographic details";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn soft_delete_column() -> Option<Self::ColumnType> {
        Some(Column::DeletedAt)
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::Name
    }

    fn default_sort_column_name() -> &'static str {
        "name"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("record_number", Column::RecordNumber),
            ("name", Column::Name),
            ("date_of_birth", Column::DateOfBirth),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("sex", Column::Sex, FilterKind::Select),
            FilterBinding::new("date_of_birth", Column::DateOfBirth, FilterKind::DateRange),
        ]
    }

    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("record_number", Column::RecordNumber),
            ("name", Column::Name),
        ]
    }
}

#[async_trait]
impl MutableAdminResource for Patient {
    type ActiveModelType = ActiveModel;
    type CreateModel = PatientCreate;
    type UpdateModel = PatientUpdate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_unknown_sex() {
        let create = PatientCreate {
            record_number: "RM-0001".to_string(),
            name: "Budi Santoso".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            sex: "other".to_string(),
            address: None,
            phone: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn filter_names_match_bindings() {
        let descriptor = <Patient as AdminResource>::descriptor();
        let binding_names: Vec<_> = Patient::filter_bindings().iter().map(|b| b.name).collect();
        for filter in &descriptor.filters {
            assert!(binding_names.contains(&filter.name), "{} unbound", filter.name);
        }
    }
}
