//! The resource traits every admin entity binds through.
//!
//! [`AdminResource`] is the read side: listing, lookup, descriptor. The
//! write side lives in [`MutableAdminResource`]. The split is deliberate:
//! append-only records (the audit log) implement only the read side, so no
//! mutating handler or route can exist for them. Immutability is a property
//! of the types, not of hidden buttons.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryOrder,
    QuerySelect, entity::prelude::*, sea_query::Expr,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::{ActorContext, Role};
use crate::descriptor::ResourceDescriptor;
use crate::errors::AdminError;
use crate::filtering::FilterBinding;
use crate::validation::Validatable;

/// Merge an update payload into an existing active model. Fields the payload
/// leaves out stay untouched.
pub trait MergeIntoActiveModel<ActiveModelType> {
    /// # Errors
    ///
    /// Returns a `DbErr` when a payload value cannot be converted.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}

/// Read side of a resource: listing, lookup, and the declarative descriptor.
#[async_trait]
pub trait AdminResource: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync,
    <<Self::EntityType as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait + Sync;
    type ColumnType: ColumnTrait + Copy + std::fmt::Debug;

    const ID_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const TABLE_NAME: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    /// The full form/table/filter/action/page configuration served to the UI.
    fn descriptor() -> ResourceDescriptor;

    /// Role required to see or use the resource. `None` admits any actor.
    #[must_use]
    fn required_role() -> Option<Role> {
        None
    }

    /// Timestamp column marking soft-deleted rows, if the resource has one.
    #[must_use]
    fn soft_delete_column() -> Option<Self::ColumnType> {
        None
    }

    /// Scope conjoined onto every read; soft-deleted rows never surface.
    #[must_use]
    fn base_condition() -> Condition {
        Self::soft_delete_column().map_or_else(Condition::all, |column| {
            Condition::all().add(column.is_null())
        })
    }

    #[must_use]
    fn default_sort_column() -> Self::ColumnType {
        Self::ID_COLUMN
    }

    #[must_use]
    fn default_sort_column_name() -> &'static str {
        "id"
    }

    #[must_use]
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        vec![("id", Self::ID_COLUMN)]
    }

    /// Executable side of the declared filter set.
    #[must_use]
    fn filter_bindings() -> Vec<FilterBinding<Self::ColumnType>> {
        Vec::new()
    }

    /// Columns covered by the free-text `q` search.
    #[must_use]
    fn searchable_columns() -> Vec<(&'static str, Self::ColumnType)> {
        Vec::new()
    }

    async fn get_all(
        db: &DatabaseConnection,
        condition: &Condition,
        order_column: Self::ColumnType,
        order_direction: Order,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>, DbErr> {
        let models = Self::EntityType::find()
            .filter(condition.clone())
            .order_by(order_column, order_direction)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    async fn get_one(db: &DatabaseConnection, id: Uuid) -> Result<Self, DbErr> {
        let model = Self::EntityType::find_by_id(id)
            .filter(Self::base_condition())
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            )))?;
        Ok(Self::from(model))
    }

    async fn total_count(db: &DatabaseConnection, condition: &Condition) -> Result<u64, DbErr> {
        let query = Self::EntityType::find().filter(condition.clone());
        PaginatorTrait::count(query, db).await
    }
}

/// Write side of a resource: create, update, and (guarded, possibly soft)
/// delete.
#[async_trait]
pub trait MutableAdminResource: AdminResource
where
    Self::ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>
        + ActiveModelBehavior
        + Send
        + Sync,
    <Self::EntityType as EntityTrait>::Model: IntoActiveModel<Self::ActiveModelType> + Sync,
    <<Self::EntityType as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>;
    type CreateModel: Into<Self::ActiveModelType> + Validatable + DeserializeOwned + Send;
    type UpdateModel: MergeIntoActiveModel<Self::ActiveModelType>
        + Validatable
        + DeserializeOwned
        + Send
        + Sync;

    /// Fill hidden fields computed from the acting identity, e.g. a creator
    /// column. Default: nothing to fill.
    fn apply_actor_defaults(_model: &mut Self::ActiveModelType, _actor: &ActorContext) {}

    /// Precondition checked before any delete reaches the store. The default
    /// allows everything; resources with dependent records override this.
    async fn delete_guard(_db: &DatabaseConnection, _id: Uuid) -> Result<(), AdminError> {
        Ok(())
    }

    async fn create(
        db: &DatabaseConnection,
        actor: &ActorContext,
        create_model: Self::CreateModel,
    ) -> Result<Self, DbErr> {
        let mut active_model: Self::ActiveModelType = create_model.into();
        Self::apply_actor_defaults(&mut active_model, actor);
        let model = active_model.insert(db).await?;
        Ok(Self::from(model))
    }

    async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        update_model: Self::UpdateModel,
    ) -> Result<Self, DbErr> {
        let model = Self::EntityType::find_by_id(id)
            .filter(Self::base_condition())
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            )))?;
        let existing: Self::ActiveModelType = model.into_active_model();
        let updated_model = update_model.merge_into_activemodel(existing)?;
        let updated = updated_model.update(db).await?;
        Ok(Self::from(updated))
    }

    /// Remove a record. Soft-deletable resources get their timestamp set
    /// instead of losing the row.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, DbErr> {
        let rows_affected = match Self::soft_delete_column() {
            Some(column) => {
                Self::EntityType::update_many()
                    .col_expr(column, Expr::value(Utc::now()))
                    .filter(Self::ID_COLUMN.eq(id))
                    .filter(column.is_null())
                    .exec(db)
                    .await?
                    .rows_affected
            }
            None => {
                Self::EntityType::delete_by_id(id)
                    .exec(db)
                    .await?
                    .rows_affected
            }
        };
        match rows_affected {
            0 => Err(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            ))),
            _ => Ok(id),
        }
    }

    async fn delete_many(db: &DatabaseConnection, ids: Vec<Uuid>) -> Result<Vec<Uuid>, DbErr> {
        match Self::soft_delete_column() {
            Some(column) => {
                Self::EntityType::update_many()
                    .col_expr(column, Expr::value(Utc::now()))
                    .filter(Self::ID_COLUMN.is_in(ids.clone()))
                    .filter(column.is_null())
                    .exec(db)
                    .await?;
            }
            None => {
                Self::EntityType::delete_many()
                    .filter(Self::ID_COLUMN.is_in(ids.clone()))
                    .exec(db)
                    .await?;
            }
        }
        Ok(ids)
    }
}
