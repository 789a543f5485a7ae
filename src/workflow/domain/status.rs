//! Task workflow status labels.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};

/// Workflow status of a task.
///
/// Transition guards depend on the acting user's privilege, so they live in
/// the mutation coordinator rather than on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not begun.
    NotStarted,
    /// The task is actively being worked.
    Working,
    /// Work is blocked on an external dependency.
    Stuck,
    /// Deliverables are awaiting internal review.
    NeedsReview,
    /// The task is complete.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Working => "working",
            Self::Stuck => "stuck",
            Self::NeedsReview => "needs_review",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_started" => Ok(Self::NotStarted),
            "working" => Ok(Self::Working),
            "stuck" => Ok(Self::Stuck),
            "needs_review" => Ok(Self::NeedsReview),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
