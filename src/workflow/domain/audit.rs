//! Audit records emitted alongside task mutations.

use super::{ParseAuditKindError, PersonId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Classification of an audited change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// The people list grew (new set is a superset of the old).
    PeopleAdded,
    /// The people list shrank (new set is a subset of the old).
    PeopleRemoved,
    /// Any other change, including mixed people-list edits.
    FieldChange,
}

impl AuditKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PeopleAdded => "people_added",
            Self::PeopleRemoved => "people_removed",
            Self::FieldChange => "field_change",
        }
    }

    /// Classifies a people-list replacement by comparing the old and new
    /// member sets.
    #[must_use]
    pub fn classify_people_change(old: &[PersonId], new: &[PersonId]) -> Self {
        let old_covered = old.iter().all(|id| new.contains(id));
        let new_covered = new.iter().all(|id| old.contains(id));
        match (old_covered, new_covered) {
            (true, false) => Self::PeopleAdded,
            (false, true) => Self::PeopleRemoved,
            _ => Self::FieldChange,
        }
    }
}

impl TryFrom<&str> for AuditKind {
    type Error = ParseAuditKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "people_added" => Ok(Self::PeopleAdded),
            "people_removed" => Ok(Self::PeopleRemoved),
            "field_change" => Ok(Self::FieldChange),
            _ => Err(ParseAuditKindError(value.to_owned())),
        }
    }
}

/// One audited change against a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    task_id: TaskId,
    kind: AuditKind,
    detail: serde_json::Value,
    recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Creates an audit record.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        kind: AuditKind,
        detail: serde_json::Value,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            kind,
            detail,
            recorded_at,
        }
    }

    /// Creates the record emitted for a people-list replacement.
    #[must_use]
    pub fn people_change(
        task_id: TaskId,
        old: &[PersonId],
        new: &[PersonId],
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let added: Vec<PersonId> = new
            .iter()
            .filter(|id| !old.contains(id))
            .copied()
            .collect();
        let removed: Vec<PersonId> = old
            .iter()
            .filter(|id| !new.contains(id))
            .copied()
            .collect();
        Self::new(
            task_id,
            AuditKind::classify_people_change(old, new),
            json!({ "added": added, "removed": removed }),
            recorded_at,
        )
    }

    /// Returns the audited task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the change classification.
    #[must_use]
    pub const fn kind(&self) -> AuditKind {
        self.kind
    }

    /// Returns the structured change detail.
    #[must_use]
    pub const fn detail(&self) -> &serde_json::Value {
        &self.detail
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
