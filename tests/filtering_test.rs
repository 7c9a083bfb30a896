// Listing filters over the HTTP surface: date ranges, selects, ternary and
// existence predicates, and free-text search.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait};
use tower::ServiceExt;
use uuid::Uuid;

mod common;
use clinic_admin::entities::kinds::{ProcedureStatus, ShiftKind};
use clinic_admin::entities::{leave_type, patient, procedure, procedure_type};
use clinic_admin::resources::{LeaveType, Procedure};
use common::{admin_actor, app_with_actor, seed_employee, setup_test_db, staff_actor};

async fn seed_procedure(
    db: &DatabaseConnection,
    patient_id: Uuid,
    type_id: Uuid,
    doctor_id: Uuid,
    performed_at: NaiveDate,
    status: ProcedureStatus,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    procedure::Entity::insert(procedure::ActiveModel {
        id: Set(id),
        patient_id: Set(patient_id),
        procedure_type_id: Set(type_id),
        doctor_id: Set(doctor_id),
        paramedic_id: Set(None),
        non_paramedic_id: Set(None),
        shift: Set(ShiftKind::Morning),
        performed_at: Set(performed_at),
        tariff: Set(150_000),
        doctor_fee: Set(90_000),
        paramedic_fee: Set(0),
        clinic_share: Set(60_000),
        status: Set(status),
        note: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    })
    .exec(db)
    .await?;
    Ok(id)
}

async fn seed_patient(db: &DatabaseConnection, record: &str, name: &str) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    patient::Entity::insert(patient::ActiveModel {
        id: Set(id),
        record_number: Set(record.to_string()),
        name: Set(name.to_string()),
        date_of_birth: Set(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()),
        sex: Set("female".to_string()),
        address: Set(None),
        phone: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    })
    .exec(db)
    .await?;
    Ok(id)
}

async fn seed_procedure_fixtures(db: &DatabaseConnection) -> Result<(), DbErr> {
    let patient_id = seed_patient(db, "RM-1001", "Ani Wijaya").await?;
    let doctor_id = seed_employee(db, "dr. Hartono").await?;
    let type_id = Uuid::new_v4();
    procedure_type::Entity::insert(procedure_type::ActiveModel {
        id: Set(type_id),
        name: Set("Perawatan Luka".to_string()),
        default_tariff: Set(150_000),
    })
    .exec(db)
    .await?;

    for (date, status) in [
        ((2024, 1, 10), ProcedureStatus::Completed),
        ((2024, 2, 15), ProcedureStatus::Completed),
        ((2024, 3, 20), ProcedureStatus::Cancelled),
    ] {
        seed_procedure(
            db,
            patient_id,
            type_id,
            doctor_id,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
        )
        .await?;
    }
    Ok(())
}

async fn count_procedures(app: &axum::Router, filter: Option<&str>) -> usize {
    let uri = filter.map_or_else(
        || "/procedures".to_string(),
        |f| format!("/procedures?filter={}", urlencode(f)),
    );
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let items: Vec<Procedure> = serde_json::from_slice(&body).unwrap();
    items.len()
}

fn urlencode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                char::from(b).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

#[tokio::test]
async fn date_range_with_no_bounds_leaves_listing_unchanged() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_procedure_fixtures(&db).await.unwrap();
    let app = app_with_actor(db, staff_actor());

    let unfiltered = count_procedures(&app, None).await;
    let empty_filter = count_procedures(&app, Some("{}")).await;
    assert_eq!(unfiltered, 3);
    assert_eq!(empty_filter, unfiltered);
}

#[tokio::test]
async fn single_bound_constrains_only_that_side() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_procedure_fixtures(&db).await.unwrap();
    let app = app_with_actor(db, staff_actor());

    let lower_only =
        count_procedures(&app, Some(r#"{"performed_at_gte": "2024-02-01"}"#)).await;
    assert_eq!(lower_only, 2);

    let upper_only =
        count_procedures(&app, Some(r#"{"performed_at_lte": "2024-01-31"}"#)).await;
    assert_eq!(upper_only, 1);

    let both = count_procedures(
        &app,
        Some(r#"{"performed_at_gte": "2024-02-01", "performed_at_lte": "2024-02-28"}"#),
    )
    .await;
    assert_eq!(both, 1);
}

#[tokio::test]
async fn select_filter_is_membership_over_chosen_values() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_procedure_fixtures(&db).await.unwrap();
    let app = app_with_actor(db, staff_actor());

    let completed = count_procedures(&app, Some(r#"{"status": ["completed"]}"#)).await;
    assert_eq!(completed, 2);

    let either =
        count_procedures(&app, Some(r#"{"status": ["completed", "cancelled"]}"#)).await;
    assert_eq!(either, 3);
}

#[tokio::test]
async fn unknown_filter_keys_are_ignored() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_procedure_fixtures(&db).await.unwrap();
    let app = app_with_actor(db, staff_actor());

    let filtered = count_procedures(&app, Some(r#"{"no_such_column": "x"}"#)).await;
    assert_eq!(filtered, 3);
}

async fn count_leave_types(app: &axum::Router, filter: &str) -> usize {
    let request = Request::builder()
        .method("GET")
        .uri(format!("/leave-types?filter={}", urlencode(filter)))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let items: Vec<LeaveType> = serde_json::from_slice(&body).unwrap();
    items.len()
}

#[tokio::test]
async fn ternary_and_existence_filters_on_leave_types() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let now = Utc::now();
    for (name, allocation, active) in [
        ("Cuti Tahunan", Some(12), true),
        ("Cuti Besar", Some(30), false),
        ("Cuti Tanpa Gaji", None, true),
    ] {
        leave_type::Entity::insert(leave_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            allocation_days: Set(allocation),
            active: Set(active),
            description: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&db)
        .await
        .unwrap();
    }
    let app = app_with_actor(db, admin_actor());

    // Ternary: absent key means any
    assert_eq!(count_leave_types(&app, "{}").await, 3);
    assert_eq!(count_leave_types(&app, r#"{"active": true}"#).await, 2);
    assert_eq!(count_leave_types(&app, r#"{"active": false}"#).await, 1);

    // Existence over the allocation column
    assert_eq!(count_leave_types(&app, r#"{"has_allocation": true}"#).await, 2);
    assert_eq!(count_leave_types(&app, r#"{"has_allocation": false}"#).await, 1);

    // Free-text search over the name
    assert_eq!(count_leave_types(&app, r#"{"q": "tahunan"}"#).await, 1);
}
