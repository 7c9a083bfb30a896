// The audit log is append-only: only GET routes exist, for every role.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;
use clinic_admin::entities::kinds::AuditAction;
use clinic_admin::resources::AuditLogEntry;
use common::{admin_actor, app_with_actor, seed_audit_entry, setup_test_db, staff_actor};

#[tokio::test]
async fn admin_can_read_the_trail() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_audit_entry(&db, AuditAction::Created, "Patient").await.unwrap();
    seed_audit_entry(&db, AuditAction::Deleted, "LeaveType").await.unwrap();

    let app = app_with_actor(db, admin_actor());
    let request = Request::builder()
        .method("GET")
        .uri("/audit-log")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let entries: Vec<AuditLogEntry> = serde_json::from_slice(&body).unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn non_admin_roles_are_denied() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    seed_audit_entry(&db, AuditAction::Updated, "Procedure").await.unwrap();

    let app = app_with_actor(db, staff_actor());
    let request = Request::builder()
        .method("GET")
        .uri("/audit-log")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn mutating_requests_have_no_route_regardless_of_role() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let entry_id = seed_audit_entry(&db, AuditAction::Created, "Patient").await.unwrap();
    let app = app_with_actor(db, admin_actor());

    // No POST/PUT/DELETE handler is mounted for the audit log; the resource
    // type has no write half to mount.
    let post = Request::builder()
        .method("POST")
        .uri("/audit-log")
        .header("content-type", "application/json")
        .body(Body::from(json!({"actor_name": "intruder"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(post).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let put = Request::builder()
        .method("PUT")
        .uri(format!("/audit-log/{entry_id}"))
        .header("content-type", "application/json")
        .body(Body::from(json!({"actor_name": "intruder"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(put).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/audit-log/{entry_id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    // The entry is still there.
    let get = Request::builder()
        .method("GET")
        .uri(format!("/audit-log/{entry_id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(get).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn schema_reports_read_only() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = app_with_actor(db, admin_actor());

    let request = Request::builder()
        .method("GET")
        .uri("/audit-log/schema")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let schema: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(schema["read_only"], true);
    assert!(schema.get("form").is_none());
    assert_eq!(schema["actions"].as_array().unwrap().len(), 0);
}
