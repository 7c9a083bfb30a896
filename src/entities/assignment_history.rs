use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Record of an employee's (re)assignment between work locations, with the
/// method and scoring data that produced it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_history_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_location_id: Uuid,
    pub previous_location_id: Option<Uuid>,
    pub assigned_by: Uuid,
    pub method: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reasons: Option<String>,
    pub score: Option<i32>,
    pub metadata: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::work_location::Entity",
        from = "Column::WorkLocationId",
        to = "super::work_location::Column::Id"
    )]
    WorkLocation,
}

impl Related<super::work_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkLocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
