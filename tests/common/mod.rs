use axum::{Extension, Router};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    Schema,
};
use uuid::Uuid;

use clinic_admin::entities::kinds::{AuditAction, LeaveStatus};
use clinic_admin::entities::{
    assignment_history, audit_log, employee, leave_request, leave_type, patient, procedure,
    procedure_type, shift_template, work_calendar, work_location,
};
use clinic_admin::resources::admin_router;
use clinic_admin::{ActorContext, Role};

/// In-memory SQLite with the schema derived from the entities themselves.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();

    // Parents before children; SQLite checks foreign keys on insert.
    db.execute(backend.build(&schema.create_table_from_entity(employee::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(work_location::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(patient::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(procedure_type::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(procedure::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(work_calendar::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(shift_template::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(leave_type::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(leave_request::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(audit_log::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(assignment_history::Entity)))
        .await?;

    Ok(db)
}

pub fn admin_actor() -> ActorContext {
    ActorContext::new(Uuid::new_v4(), "Admin User", vec![Role::Admin, Role::Staff])
}

pub fn staff_actor() -> ActorContext {
    ActorContext::new(Uuid::new_v4(), "Staff User", vec![Role::Staff])
}

/// Full admin router with the given actor injected on every request.
pub fn app_with_actor(db: DatabaseConnection, actor: ActorContext) -> Router {
    admin_router(db).layer(Extension(actor))
}

/// Full admin router with no authenticated actor.
pub fn app_anonymous(db: DatabaseConnection) -> Router {
    admin_router(db)
}

pub async fn seed_employee(db: &DatabaseConnection, name: &str) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    employee::Entity::insert(employee::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        unit: Set(None),
        active: Set(true),
    })
    .exec(db)
    .await?;
    Ok(id)
}

pub async fn seed_leave_type(
    db: &DatabaseConnection,
    name: &str,
    allocation_days: Option<i32>,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    leave_type::Entity::insert(leave_type::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        allocation_days: Set(allocation_days),
        active: Set(true),
        description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .exec(db)
    .await?;
    Ok(id)
}

pub async fn seed_leave_request(
    db: &DatabaseConnection,
    leave_type_id: Uuid,
    employee_id: Uuid,
    status: LeaveStatus,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    leave_request::Entity::insert(leave_request::ActiveModel {
        id: Set(id),
        leave_type_id: Set(leave_type_id),
        employee_id: Set(employee_id),
        starts_on: Set(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()),
        ends_on: Set(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()),
        status: Set(status),
        reason: Set(None),
        created_at: Set(Utc::now()),
    })
    .exec(db)
    .await?;
    Ok(id)
}

/// Simulates the external logging collaborator that owns audit inserts.
pub async fn seed_audit_entry(
    db: &DatabaseConnection,
    action: AuditAction,
    subject_model: &str,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    audit_log::Entity::insert(audit_log::ActiveModel {
        id: Set(id),
        logged_at: Set(Utc::now()),
        actor_name: Set("dr. Sari".to_string()),
        actor_role: Set("admin".to_string()),
        action: Set(action),
        subject_model: Set(subject_model.to_string()),
        subject_id: Set(Uuid::new_v4().to_string()),
        description: Set(None),
        ip_address: Set(Some("10.0.0.5".to_string())),
    })
    .exec(db)
    .await?;
    Ok(id)
}
