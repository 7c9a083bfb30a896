//! Actor identity and role checks.
//!
//! The host application authenticates the request and injects an
//! [`ActorContext`] via `axum::Extension`. Every operation that needs
//! identity or authorization takes the context as an explicit parameter;
//! nothing in this crate reads global authentication state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Roles recognised by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Doctor,
    Paramedic,
    Staff,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Doctor => "doctor",
            Self::Paramedic => "paramedic",
            Self::Staff => "staff",
        }
    }
}

/// Identity of the acting user for the current request.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub actor_id: Uuid,
    pub display_name: String,
    pub roles: Vec<Role>,
}

impl ActorContext {
    #[must_use]
    pub fn new(actor_id: Uuid, display_name: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            actor_id,
            display_name: display_name.into(),
            roles,
        }
    }

    /// Read-only role membership test, evaluated per request.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_role_matches_membership() {
        let actor = ActorContext::new(Uuid::new_v4(), "dr. Sari", vec![Role::Doctor, Role::Staff]);
        assert!(actor.has_role(Role::Doctor));
        assert!(actor.has_role(Role::Staff));
        assert!(!actor.has_role(Role::Admin));
    }

    #[test]
    fn empty_roles_grant_nothing() {
        let actor = ActorContext::new(Uuid::new_v4(), "guest", vec![]);
        assert!(!actor.has_role(Role::Staff));
    }
}
