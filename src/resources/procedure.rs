//! Medical procedures with tariff and fee split.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue::Set, DbErr};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::descriptor::{
    ActionDescriptor, BadgeDomain, CellFormat, ColumnDef, FieldDef, FilterDescriptor, FormSchema,
    PageMap, ResourceDescriptor, SelectOption, SortDir, TableSchema, Widget,
};
use crate::entities::kinds::{ProcedureStatus, ShiftKind};
use crate::entities::procedure::{ActiveModel, Column, Entity, Model};
use crate::filtering::{FilterBinding, FilterKind};
use crate::resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
use crate::validation::{Validatable, ValidationErrors, validators};

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Procedure {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub procedure_type_id: Uuid,
    pub doctor_id: Uuid,
    pub paramedic_id: Option<Uuid>,
    pub non_paramedic_id: Option<Uuid>,
    pub shift: ShiftKind,
    pub performed_at: NaiveDate,
    pub tariff: i64,
    pub doctor_fee: i64,
    pub paramedic_fee: i64,
    pub clinic_share: i64,
    pub status: ProcedureStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Procedure {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            procedure_type_id: model.procedure_type_id,
            doctor_id: model.doctor_id,
            paramedic_id: model.paramedic_id,
            non_paramedic_id: model.non_paramedic_id,
            shift: model.shift,
            performed_at: model.performed_at,
            tariff: model.tariff,
            doctor_fee: model.doctor_fee,
            paramedic_fee: model.paramedic_fee,
            clinic_share: model.clinic_share,
            status: model.status,
            note: model.note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct ProcedureCreate {
    pub patient_id: Uuid,
    pub procedure_type_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(default)]
    pub paramedic_id: Option<Uuid>,
    #[serde(default)]
    pub non_paramedic_id: Option<Uuid>,
    pub shift: ShiftKind,
    pub performed_at: NaiveDate,
    pub tariff: i64,
    #[serde(default)]
    pub doctor_fee: i64,
    #[serde(default)]
    pub paramedic_fee: i64,
    #[serde(default)]
    pub clinic_share: i64,
    pub status: ProcedureStatus,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<ProcedureCreate> for ActiveModel {
    fn from(create: ProcedureCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            patient_id: Set(create.patient_id),
            procedure_type_id: Set(create.procedure_type_id),
            doctor_id: Set(create.doctor_id),
            paramedic_id: Set(create.paramedic_id),
            non_paramedic_id: Set(create.non_paramedic_id),
            shift: Set(create.shift),
            performed_at: Set(create.performed_at),
            tariff: Set(create.tariff),
            doctor_fee: Set(create.doctor_fee),
            paramedic_fee: Set(create.paramedic_fee),
            clinic_share: Set(create.clinic_share),
            status: Set(create.status),
            note: Set(create.note),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
    }
}

impl Validatable for ProcedureCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_non_negative("tariff", self.tariff));
        errors.check(validators::validate_non_negative("doctor_fee", self.doctor_fee));
        errors.check(validators::validate_non_negative("paramedic_fee", self.paramedic_fee));
        errors.check(validators::validate_non_negative("clinic_share", self.clinic_share));
        errors.into_result()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProcedureUpdate {
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub procedure_type_id: Option<Uuid>,
    #[serde(default)]
    pub doctor_id: Option<Uuid>,
    #[serde(default)]
    pub paramedic_id: Option<Uuid>,
    #[serde(default)]
    pub non_paramedic_id: Option<Uuid>,
    #[serde(default)]
    pub shift: Option<ShiftKind>,
    #[serde(default)]
    pub performed_at: Option<NaiveDate>,
    #[serde(default)]
    pub tariff: Option<i64>,
    #[serde(default)]
    pub doctor_fee: Option<i64>,
    #[serde(default)]
    pub paramedic_fee: Option<i64>,
    #[serde(default)]
    pub clinic_share: Option<i64>,
    #[serde(default)]
    pub status: Option<ProcedureStatus>,
    #[serde(default)]
    pub note: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for ProcedureUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(patient_id) = self.patient_id {
            existing.patient_id = Set(patient_id);
        }
        if let Some(procedure_type_id) = self.procedure_type_id {
            existing.procedure_type_id = Set(procedure_type_id);
        }
        if let Some(doctor_id) = self.doctor_id {
            existing.doctor_id = Set(doctor_id);
        }
        if let Some(paramedic_id) = self.paramedic_id {
            existing.paramedic_id = Set(Some(paramedic_id));
        }
        if let Some(non_paramedic_id) = self.non_paramedic_id {
            existing.non_paramedic_id = Set(Some(non_paramedic_id));
        }
        if let Some(shift) = self.shift {
            existing.shift = Set(shift);
        }
        if let Some(performed_at) = self.performed_at {
            existing.performed_at = Set(performed_at);
        }
        if let Some(tariff) = self.tariff {
            existing.tariff = Set(tariff);
        }
        if let Some(doctor_fee) = self.doctor_fee {
            existing.doctor_fee = Set(doctor_fee);
        }
        if let Some(paramedic_fee) = self.paramedic_fee {
            existing.paramedic_fee = Set(paramedic_fee);
        }
        if let Some(clinic_share) = self.clinic_share {
            existing.clinic_share = Set(clinic_share);
        }
        if let Some(status) = self.status {
            existing.status = Set(status);
        }
        if let Some(note) = self.note {
            existing.note = Set(Some(note));
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl Validatable for ProcedureUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("tariff", self.tariff),
            ("doctor_fee", self.doctor_fee),
            ("paramedic_fee", self.paramedic_fee),
            ("clinic_share", self.clinic_share),
        ] {
            if let Some(amount) = value {
                errors.check(validators::validate_non_negative(field, amount));
            }
        }
        errors.into_result()
    }
}

fn status_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("scheduled", "Scheduled"),
        SelectOption::new("completed", "Completed"),
        SelectOption::new("cancelled", "Cancelled"),
    ]
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
        name_singular: Procedure::RESOURCE_NAME_SINGULAR,
        name_plural: Procedure::RESOURCE_NAME_PLURAL,
        description: Procedure::RESOURCE_DESCRIPTION,
        read_only: false,
        required_role: None,
        pages: PageMap::new(
            "/procedures",
            "/procedures/new",
            "/procedures/{id}/edit",
            "/procedures/{id}",
        ),
        form: Some(FormSchema::new(vec![
            FieldDef::required("patient_id", "Patient", Widget::select_relation("patients", "name")),
            FieldDef::required(
                "procedure_type_id",
                "Procedure",
                Widget::select_relation("procedure-types", "name"),
            ),
            FieldDef::required("doctor_id", "Doctor", Widget::select_relation("employees", "name")),
            FieldDef::optional(
                "paramedic_id",
                "Paramedic",
                Widget::select_relation("employees", "name"),
            ),
            FieldDef::optional(
                "non_paramedic_id",
                "Non-paramedic",
                Widget::select_relation("employees", "name"),
            ),
            FieldDef::required("shift", "Shift", Widget::select_static(shift_options())),
            FieldDef::required("performed_at", "Date", Widget::Date),
            FieldDef::required("tariff", "Tariff", Widget::Money),
            FieldDef::optional("doctor_fee", "Doctor fee", Widget::Money),
            FieldDef::optional("paramedic_fee", "Paramedic fee", Widget::Money),
            FieldDef::optional("clinic_share", "Clinic share", Widget::Money),
            FieldDef::required("status", "Status", Widget::select_static(status_options())),
            FieldDef::optional("note", "Note", Widget::TextArea { rows: 3 }),
        ])),
        table: TableSchema::new(
            vec![
                ColumnDef::new(
                    "performed_at",
                    "Date",
                    CellFormat::Date { pattern: "%d %b %Y" },
                )
                .sortable(),
                ColumnDef::new(
                    "patient_id",
                    "Patient",
                    CellFormat::Relation {
                        resource: "patients",
                        label_field: "name",
                    },
                ),
                ColumnDef::new(
                    "procedure_type_id",
                    "Procedure",
                    CellFormat::Relation {
                        resource: "procedure-types",
                        label_field: "name",
                    },
                ),
                ColumnDef::new(
                    "doctor_id",
                    "Doctor",
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
                ColumnDef::new("tariff", "Tariff", CellFormat::Money).sortable(),
                ColumnDef::new(
                    "status",
                    "Status",
                    CellFormat::Badge {
                        domain: BadgeDomain::ProcedureStatus,
                    },
                ),
            ],
            ("performed_at", SortDir::Desc),
        ),
        filters: vec![
            FilterDescriptor::new("performed_at", "Performed between", FilterKind::DateRange),
            FilterDescriptor::new("status", "Status", FilterKind::Select)
                .with_options(status_options()),
            FilterDescriptor::new("shift", "Shift", FilterKind::Select)
                .with_options(shift_options()),
        ],
        actions: vec![
            ActionDescriptor::new("delete", "Delete").with_confirm("Delete this procedure?"),
            ActionDescriptor::new("delete", "Delete selected").bulk(),
        ],
    }
}

#[async_trait]
impl AdminResource for Procedure {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Self::ColumnType = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "procedure";
    const RESOURCE_NAME_PLURAL: &'static str = "procedures";
    const TABLE_NAME: &'static str = "procedures";
    const RESOURCE_DESCRIPTION: &'static str =
        "Medical procedures with their tariffs and fee splits";

    fn descriptor() -> ResourceDescriptor {
        descriptor()
    }

    fn soft_delete_column() -> Option<Self::ColumnType> {
        Some(Column::DeletedAt)
    }

    fn default_sort_column() -> Self::ColumnType {
        Column::PerformedAt
    }

    fn default_sort_column_name() -> &'static str {
        "performed_at"
    }

    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![
            ("performed_at", Column::PerformedAt),
            ("tariff", Column::Tariff),
            ("status", Column::Status),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        vec![
            FilterBinding::new("performed_at", Column::PerformedAt, FilterKind::DateRange),
            FilterBinding::new("status", Column::Status, FilterKind::Select),
            FilterBinding::new("shift", Column::Shift, FilterKind::Select),
            FilterBinding::new("patient_id", Column::PatientId, FilterKind::Equals),
            FilterBinding::new("doctor_id", Column::DoctorId, FilterKind::Equals),
        ]
    }
}

#[async_trait]
impl MutableAdminResource for Procedure {
    type ActiveModelType = ActiveModel;
    type CreateModel = ProcedureCreate;
    type UpdateModel = ProcedureUpdate;
}
