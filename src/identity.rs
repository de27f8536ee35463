//! Session identity.
//!
//! The actor is self-asserted: nothing here authenticates anybody. The role is
//! a capability tag read by the permission gate.

use serde::{Deserialize, Serialize};

use crate::fields::Role;

/// Name shown for a session that never set one.
pub const DEFAULT_ACTOR_NAME: &str = "Anonimo";

/// The person currently driving the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Actor {
            name: name.into(),
            role,
        }
    }

    /// True iff the actor holds the full-control role.
    pub fn is_privileged(&self) -> bool {
        self.role == Role::Operaio
    }
}

impl Default for Actor {
    fn default() -> Self {
        Actor::new(DEFAULT_ACTOR_NAME, Role::Umarell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_actor_is_read_only() {
        let actor = Actor::default();
        assert_eq!(actor.name, "Anonimo");
        assert!(!actor.is_privileged());
    }

    #[test]
    fn only_operaio_is_privileged() {
        assert!(Actor::new("Gino", Role::Operaio).is_privileged());
        assert!(!Actor::new("Gino", Role::Umarell).is_privileged());
        // Names carry no weight.
        assert!(!Actor::new("admin", Role::Umarell).is_privileged());
    }
}
