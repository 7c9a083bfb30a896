//! Generic axum handlers and router assembly.
//!
//! One synchronous request is handled to completion per interaction; there
//! are no background tasks and no shared mutable state beyond the database
//! connection in the router state. Role gates run before anything touches
//! the store, and deletes only go through the guarded compositions in
//! [`crate::actions`].

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use hyper::HeaderMap;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::actions::{guarded_delete, guarded_delete_many};
use crate::auth::ActorContext;
use crate::descriptor::ResourceDescriptor;
use crate::errors::AdminError;
use crate::filtering::{apply_filters, calculate_content_range, parse_pagination, parse_sorting};
use crate::models::ListParams;
use crate::resource::{AdminResource, MutableAdminResource};
use crate::validation::Validatable;

fn check_access<R: AdminResource>(actor: Option<&ActorContext>) -> Result<(), AdminError> {
    let Some(role) = R::required_role() else {
        return Ok(());
    };
    let authorized = actor.is_some_and(|actor| actor.has_role(role));
    if authorized {
        Ok(())
    } else {
        Err(AdminError::forbidden(format!(
            "This resource requires the {} role",
            role.as_str()
        )))
    }
}

fn require_actor(actor: Option<Extension<ActorContext>>) -> Result<ActorContext, AdminError> {
    actor
        .map(|Extension(actor)| actor)
        .ok_or_else(|| AdminError::forbidden("Authentication required"))
}

/// List records: base scope + declared filters, sorted and paginated, with a
/// `Content-Range` header for the UI's pager.
pub async fn list<R>(
    Query(params): Query<ListParams>,
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
) -> Result<(HeaderMap, Json<Vec<R>>), AdminError>
where
    R: AdminResource + Serialize,
{
    check_access::<R>(actor.as_deref())?;

    let (offset, limit) = parse_pagination(&params);
    let condition = R::base_condition().add(apply_filters(
        params.filter.as_deref(),
        &R::filter_bindings(),
        &R::searchable_columns(),
    ));
    let (order_column, order_direction) = parse_sorting(
        &params,
        &R::sortable_columns(),
        R::default_sort_column_name(),
        R::default_sort_column(),
    );

    let items = R::get_all(&db, &condition, order_column, order_direction, offset, limit).await?;
    let total_count = R::total_count(&db, &condition).await?;
    let headers = calculate_content_range(offset, limit, total_count, R::RESOURCE_NAME_PLURAL);
    Ok((headers, Json(items)))
}

pub async fn get_one<R>(
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<R>, AdminError>
where
    R: AdminResource + Serialize,
{
    check_access::<R>(actor.as_deref())?;
    let item = R::get_one(&db, id).await?;
    Ok(Json(item))
}

/// Serve the resource's declarative descriptor for the UI.
pub async fn describe<R>(
    actor: Option<Extension<ActorContext>>,
) -> Result<Json<ResourceDescriptor>, AdminError>
where
    R: AdminResource,
{
    check_access::<R>(actor.as_deref())?;
    Ok(Json(R::descriptor()))
}

/// Create a record. The payload is validated before anything reaches the
/// store; hidden actor-derived defaults are filled from the explicit actor
/// context.
pub async fn create<R>(
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
    Json(payload): Json<R::CreateModel>,
) -> Result<(StatusCode, Json<R>), AdminError>
where
    R: MutableAdminResource + Serialize,
    <<R as AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    let actor = require_actor(actor)?;
    check_access::<R>(Some(&actor))?;
    payload.validate()?;
    let created = R::create(&db, &actor, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<R>(
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<R::UpdateModel>,
) -> Result<Json<R>, AdminError>
where
    R: MutableAdminResource + Serialize,
    <<R as AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    let actor = require_actor(actor)?;
    check_access::<R>(Some(&actor))?;
    payload.validate()?;
    let updated = R::update(&db, id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_one<R>(
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Uuid>), AdminError>
where
    R: MutableAdminResource + Serialize,
    <<R as AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    let actor = require_actor(actor)?;
    check_access::<R>(Some(&actor))?;
    let deleted = guarded_delete::<R>(&db, id).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)))
}

/// Bulk delete. All guards run before any row is touched; one veto aborts
/// the whole batch.
pub async fn delete_many<R>(
    State(db): State<DatabaseConnection>,
    actor: Option<Extension<ActorContext>>,
    Json(ids): Json<Vec<Uuid>>,
) -> Result<(StatusCode, Json<Vec<Uuid>>), AdminError>
where
    R: MutableAdminResource + Serialize,
    <<R as AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    let actor = require_actor(actor)?;
    check_access::<R>(Some(&actor))?;
    let deleted = guarded_delete_many::<R>(&db, ids).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)))
}

/// Full CRUD router for a mutable resource.
#[must_use]
pub fn crud_router<R>() -> Router<DatabaseConnection>
where
    R: MutableAdminResource + Serialize + 'static,
    <<R as AdminResource>::EntityType as sea_orm::EntityTrait>::Model:
        sea_orm::IntoActiveModel<<R as MutableAdminResource>::ActiveModelType>,
{
    Router::new()
        .route(
            "/",
            get(list::<R>).post(create::<R>).delete(delete_many::<R>),
        )
        .route("/schema", get(describe::<R>))
        .route(
            "/{id}",
            get(get_one::<R>).put(update::<R>).delete(delete_one::<R>),
        )
}

/// Router for append-only resources. Only GET routes exist; mutating
/// requests answer 405 because no handler is registered, and none could be:
/// the mutating handlers require [`MutableAdminResource`], which read-only
/// resources do not implement.
#[must_use]
pub fn read_only_router<R>() -> Router<DatabaseConnection>
where
    R: AdminResource + Serialize + 'static,
{
    Router::new()
        .route("/", get(list::<R>))
        .route("/schema", get(describe::<R>))
        .route("/{id}", get(get_one::<R>))
}
