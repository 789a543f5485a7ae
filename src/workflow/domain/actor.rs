//! Per-request acting-user context.

use super::{PersonId, Task};
use serde::{Deserialize, Serialize};

/// Membership tier of the acting user.
///
/// The derived [`Ord`] follows privilege order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    /// External collaborator with view-only access.
    Guest,
    /// Regular staff member.
    TeamMember,
    /// Board administrator.
    Admin,
    /// Account owner.
    God,
}

/// Identity and privilege of the user performing an operation.
///
/// Passed explicitly into every core entry point; the core holds no ambient
/// user state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    person_id: PersonId,
    tier: MembershipTier,
}

impl ActorContext {
    /// Creates an actor context.
    #[must_use]
    pub const fn new(person_id: PersonId, tier: MembershipTier) -> Self {
        Self { person_id, tier }
    }

    /// Returns the acting person's identifier.
    #[must_use]
    pub const fn person_id(&self) -> PersonId {
        self.person_id
    }

    /// Returns the acting person's membership tier.
    #[must_use]
    pub const fn tier(&self) -> MembershipTier {
        self.tier
    }

    /// Returns true when the actor may reopen a completed task.
    #[must_use]
    pub fn can_override_status_lock(&self) -> bool {
        self.tier >= MembershipTier::Admin
    }

    /// Returns true when the actor is the task's assigned project manager.
    #[must_use]
    pub fn is_project_manager_of(&self, task: &Task) -> bool {
        task.roles().project_manager() == Some(self.person_id)
    }
}
