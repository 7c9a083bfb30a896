// Work calendar entries: the creator column comes from the actor context,
// never from the submitted form.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;
use clinic_admin::resources::WorkCalendarEntry;
use clinic_admin::{ActorContext, Role};
use common::{app_anonymous, app_with_actor, seed_employee, setup_test_db};

#[tokio::test]
async fn creator_is_filled_from_the_acting_identity() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let employee_id = seed_employee(&db, "Rudi Hartono").await.unwrap();

    let actor_id = Uuid::new_v4();
    let actor = ActorContext::new(actor_id, "Scheduler", vec![Role::Staff]);
    let app = app_with_actor(db, actor);

    // The payload tries to smuggle its own creator; created_by is not part
    // of the create model, so only the actor context can set it.
    let create_data = json!({
        "employee_id": employee_id,
        "date": "2024-06-03",
        "shift": "night",
        "unit": "IGD",
        "created_by": Uuid::new_v4()
    });
    let request = Request::builder()
        .method("POST")
        .uri("/work-calendar")
        .header("content-type", "application/json")
        .body(Body::from(create_data.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: WorkCalendarEntry = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.created_by, actor_id);
}

#[tokio::test]
async fn anonymous_requests_cannot_mutate() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let employee_id = seed_employee(&db, "Rudi Hartono").await.unwrap();
    let app = app_anonymous(db);

    let create_data = json!({
        "employee_id": employee_id,
        "date": "2024-06-03",
        "shift": "morning",
        "unit": "Poli Umum"
    });
    let request = Request::builder()
        .method("POST")
        .uri("/work-calendar")
        .header("content-type", "application/json")
        .body(Body::from(create_data.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn schema_endpoint_serves_the_descriptor() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let app = app_with_actor(db, common::staff_actor());

    let request = Request::builder()
        .method("GET")
        .uri("/work-calendar/schema")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let schema: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(schema["name_plural"], "work calendar entries");
    assert_eq!(schema["pages"]["index"], "/work-calendar");

    // The creator field is declared as a hidden, actor-derived widget.
    let fields = schema["form"]["fields"].as_array().unwrap();
    let created_by = fields
        .iter()
        .find(|f| f["name"] == "created_by")
        .expect("created_by declared on the form");
    assert_eq!(created_by["widget"]["widget"], "hidden");
    assert_eq!(created_by["widget"]["default"], "current_actor");
}
