use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

use super::kinds::{ProcedureStatus, ShiftKind};

/// A performed (or scheduled) medical procedure with its tariff and fee
/// split. Soft-deletable.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "procedures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::patient::Entity",
        from = "Column::PatientId",
        to = "super::patient::Column::Id"
    )]
    Patient,
    #[sea_orm(
        belongs_to = "super::procedure_type::Entity",
        from = "Column::ProcedureTypeId",
        to = "super::procedure_type::Column::Id"
    )]
    ProcedureType,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::DoctorId",
        to = "super::employee::Column::Id"
    )]
    Doctor,
}

impl Related<super::patient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patient.def()
    }
}

impl Related<super::procedure_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcedureType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
