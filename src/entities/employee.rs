use sea_orm::entity::prelude::*;

/// Clinic staff member: doctors, paramedics, and support staff. Lookup
/// entity for every employee-referencing select field (label: `name`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_calendar::Entity")]
    WorkCalendar,
}

impl Related<super::work_calendar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkCalendar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
