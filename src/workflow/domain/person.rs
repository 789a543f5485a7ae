//! Person references used in task assignments.

use super::PersonId;
use serde::{Deserialize, Serialize};

/// A reference to a team member or external collaborator.
///
/// Whether a person is a guest is not stored here: it derives from contact
/// data held by the person directory collaborator, which the core queries
/// at the moment a decision depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    display_name: String,
}

impl Person {
    /// Creates a person reference.
    #[must_use]
    pub fn new(id: PersonId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Returns the person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
