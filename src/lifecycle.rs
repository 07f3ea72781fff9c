//! Ticket status graph and the role-scoped checks applied before a mutation
//! is sent to the remote store.
//!
//! ```text
//! PENDING <──staff──> WASHED ──student──> PICKED_UP
//!
//! DELIVERED (reserved, unreachable)
//! ```

use derive_more::derive::{Display, Error};

use crate::api::{
    ticket::{ItemCounts, Status},
    user::Role,
};

#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Error {
    #[display("a {role} cannot set a ticket to {to}")]
    TargetNotPermitted { role: Role, to: Status },

    #[display("a {role} cannot move a ticket from {from} to {to}")]
    SourceNotPermitted { role: Role, from: Status, to: Status },

    #[display("ticket is already {status}")]
    Unchanged { status: Status },

    #[display("a ticket needs at least one item")]
    NoItems,

    #[display("only the owning student can delete a ticket")]
    DeleteNotPermitted,
}

/// Statuses `role` is ever offered as a target.
pub fn permitted_targets(role: Role) -> &'static [Status] {
    match role {
        Role::Staff => &[Status::Pending, Status::Washed],
        Role::Student => &[Status::PickedUp],
    }
}

fn permitted_sources(role: Role, to: Status) -> &'static [Status] {
    match (role, to) {
        // Staff may flip back and forth between the two freely.
        (Role::Staff, Status::Pending | Status::Washed) => {
            &[Status::Pending, Status::Washed]
        }
        (Role::Student, Status::PickedUp) => &[Status::Washed],
        _ => &[],
    }
}

pub fn check_transition(
    role: Role,
    from: Status,
    to: Status,
) -> Result<(), Error> {
    use Error as E;

    if !permitted_targets(role).contains(&to) {
        return Err(E::TargetNotPermitted { role, to });
    }
    if from == to {
        return Err(E::Unchanged { status: to });
    }
    if !permitted_sources(role, to).contains(&from) {
        return Err(E::SourceNotPermitted { role, from, to });
    }
    Ok(())
}

pub fn can_transition(role: Role, from: Status, to: Status) -> bool {
    check_transition(role, from, to).is_ok()
}

/// Targets to offer `role` for a ticket currently in `from`.
pub fn offered_targets(role: Role, from: Status) -> Vec<Status> {
    permitted_targets(role)
        .iter()
        .copied()
        .filter(|&to| can_transition(role, from, to))
        .collect()
}

pub fn check_new_ticket(items: &ItemCounts) -> Result<(), Error> {
    if items.total() == 0 {
        return Err(Error::NoItems);
    }
    Ok(())
}

/// Trims issue text; `None` means the issue is cleared.
pub fn normalize_issue(text: &str) -> Option<&str> {
    Some(text.trim()).filter(|t| !t.is_empty())
}

pub fn check_delete(role: Role, owned: bool) -> Result<(), Error> {
    if role != Role::Student || !owned {
        return Err(Error::DeleteNotPermitted);
    }
    Ok(())
}
