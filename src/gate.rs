//! Permission gate applied in front of every registry mutation.

use std::fmt;

use tracing::trace;

use crate::identity::Actor;

/// The mutating operations the gate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddProject,
    AddTask,
    UpdateStatus,
    DeleteTask,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mutation::AddProject => "add project",
            Mutation::AddTask => "add task",
            Mutation::UpdateStatus => "update status",
            Mutation::DeleteTask => "delete task",
        };
        f.write_str(s)
    }
}

/// Whether `actor` may change task state.
pub fn can_mutate_tasks(actor: &Actor) -> bool {
    actor.is_privileged()
}

/// Gate check for a single mutation.
///
/// Every mutation, creation included, uses the same predicate, so a read-only
/// actor cannot grow the registries either. `mutation` only names the attempt
/// in the trace.
pub fn authorize(actor: &Actor, mutation: Mutation) -> bool {
    let allowed = can_mutate_tasks(actor);
    trace!(%mutation, allowed, "gate check");
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Role;

    const ALL: [Mutation; 4] = [
        Mutation::AddProject,
        Mutation::AddTask,
        Mutation::UpdateStatus,
        Mutation::DeleteTask,
    ];

    #[test]
    fn operaio_passes_every_mutation() {
        let actor = Actor::new("Gino", Role::Operaio);
        assert!(can_mutate_tasks(&actor));
        assert!(ALL.iter().all(|m| authorize(&actor, *m)));
    }

    #[test]
    fn umarell_is_denied_every_mutation() {
        let actor = Actor::new("Gino", Role::Umarell);
        assert!(!can_mutate_tasks(&actor));
        assert!(ALL.iter().all(|m| !authorize(&actor, *m)));
    }
}
