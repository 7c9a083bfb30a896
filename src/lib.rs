pub mod actions;
pub mod auth;
pub mod descriptor;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod resource;
pub mod resources;
pub mod validation;

pub use actions::{GuardViolation, guarded_delete, guarded_delete_many};
pub use auth::{ActorContext, Role};
pub use errors::AdminError;
pub use notify::{Notification, Severity};
pub use resource::{AdminResource, MergeIntoActiveModel, MutableAdminResource};
