//! Task aggregate root.

use super::{PersonId, RoleAssignments, TaskId, TaskPatch, TaskStatus};
use crate::phase::{self, Fase, ParsePhaseError, Phase};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A work order moving through the dubbing production sequence.
///
/// The board a task lives on *is* its phase: advancing a phase moves the
/// task to the next phase's board rather than rewriting a phase field in
/// place. The viewer set of a private task lives in the task store, keyed
/// by task identifier, not on this aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    board: String,
    fase: Option<Fase>,
    status: TaskStatus,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    date_delivered: Option<NaiveDate>,
    date_assigned: Option<NaiveDate>,
    guest_due_date: Option<NaiveDate>,
    miami_due_date: Option<NaiveDate>,
    client_due_date: Option<NaiveDate>,
    is_private: bool,
    roles: RoleAssignments,
    people: Vec<PersonId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Name of the board the task lives on.
    pub board: String,
    /// Recorded workflow stage.
    pub fase: Option<Fase>,
    /// Workflow status.
    pub status: TaskStatus,
    /// When work started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the task was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Delivery date.
    pub date_delivered: Option<NaiveDate>,
    /// Guest assignment date.
    pub date_assigned: Option<NaiveDate>,
    /// Guest-facing due date.
    pub guest_due_date: Option<NaiveDate>,
    /// Miami-branch due date.
    pub miami_due_date: Option<NaiveDate>,
    /// Client-facing due date.
    pub client_due_date: Option<NaiveDate>,
    /// Privacy flag.
    pub is_private: bool,
    /// Role-field assignments.
    pub roles: RoleAssignments,
    /// Role-free people list.
    pub people: Vec<PersonId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a fresh task on a board.
    #[must_use]
    pub fn new_on_board(board: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            board: board.into(),
            fase: None,
            status: TaskStatus::NotStarted,
            started_at: None,
            completed_at: None,
            date_delivered: None,
            date_assigned: None,
            guest_due_date: None,
            miami_due_date: None,
            client_due_date: None,
            is_private: false,
            roles: RoleAssignments::default(),
            people: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board: data.board,
            fase: data.fase,
            status: data.status,
            started_at: data.started_at,
            completed_at: data.completed_at,
            date_delivered: data.date_delivered,
            date_assigned: data.date_assigned,
            guest_due_date: data.guest_due_date,
            miami_due_date: data.miami_due_date,
            client_due_date: data.client_due_date,
            is_private: data.is_private,
            roles: data.roles,
            people: data.people,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the name of the board the task lives on.
    #[must_use]
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Returns the phase derived from the owning board's name.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePhaseError`] when the board name carries no known
    /// phase label.
    pub fn current_phase(&self) -> Result<Phase, ParsePhaseError> {
        phase::phase_for_board_name(&self.board)
    }

    /// Returns the workflow stage recorded on the `fase` column.
    #[must_use]
    pub const fn fase(&self) -> Option<Fase> {
        self.fase
    }

    /// Returns true while the task has not left its initial stages.
    ///
    /// A task with no recorded stage, an on-hold task, and a task still in
    /// Kickoff all count as pre-kickoff for permission purposes.
    #[must_use]
    pub fn is_pre_kickoff(&self) -> bool {
        matches!(
            self.fase,
            None | Some(Fase::OnHold) | Some(Fase::InPhase(Phase::Kickoff))
        )
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when work started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task was completed, if it has been.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the recorded delivery date.
    #[must_use]
    pub const fn date_delivered(&self) -> Option<NaiveDate> {
        self.date_delivered
    }

    /// Returns the date the current guest assignee was given the task.
    #[must_use]
    pub const fn date_assigned(&self) -> Option<NaiveDate> {
        self.date_assigned
    }

    /// Returns the guest-facing due date.
    #[must_use]
    pub const fn guest_due_date(&self) -> Option<NaiveDate> {
        self.guest_due_date
    }

    /// Returns the Miami-branch due date.
    #[must_use]
    pub const fn miami_due_date(&self) -> Option<NaiveDate> {
        self.miami_due_date
    }

    /// Returns the client-facing due date.
    #[must_use]
    pub const fn client_due_date(&self) -> Option<NaiveDate> {
        self.client_due_date
    }

    /// Returns true when the task is visible only to explicit viewers.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.is_private
    }

    /// Returns the role-field assignments.
    #[must_use]
    pub const fn roles(&self) -> &RoleAssignments {
        &self.roles
    }

    /// Returns the role-free people list.
    #[must_use]
    pub fn people(&self) -> &[PersonId] {
        &self.people
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a persisted patch to the aggregate in place.
    ///
    /// Used by stores that keep whole aggregates; the field-by-field
    /// destructuring keeps this in lockstep with [`TaskPatch`].
    pub fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        let TaskPatch {
            status,
            fase,
            started_at,
            completed_at,
            date_delivered,
            date_assigned,
            guest_due_date,
            miami_due_date,
            client_due_date,
            is_private,
            roles,
        } = patch;

        if let Some(new_status) = status {
            self.status = *new_status;
        }
        match fase {
            super::FieldChange::Unchanged => {}
            super::FieldChange::Set(value) => self.fase = Some(*value),
            super::FieldChange::Clear => self.fase = None,
        }
        started_at.apply_to(&mut self.started_at);
        completed_at.apply_to(&mut self.completed_at);
        date_delivered.apply_to(&mut self.date_delivered);
        date_assigned.apply_to(&mut self.date_assigned);
        guest_due_date.apply_to(&mut self.guest_due_date);
        miami_due_date.apply_to(&mut self.miami_due_date);
        client_due_date.apply_to(&mut self.client_due_date);
        if let Some(private) = is_private {
            self.is_private = *private;
        }
        for (field, change) in roles.entries() {
            match change {
                super::FieldChange::Unchanged => {}
                super::FieldChange::Set(id) => self.roles.set(field, Some(*id)),
                super::FieldChange::Clear => self.roles.set(field, None),
            }
        }
        self.updated_at = now;
    }

    /// Creates a copy of this task on the same board.
    ///
    /// The copy gets a fresh identifier and fresh collaboration state: an
    /// empty people list and (by omission here) no viewers.
    #[must_use]
    pub fn duplicate(&self, now: DateTime<Utc>) -> Self {
        let mut copy = self.clone();
        copy.id = TaskId::new();
        copy.people = Vec::new();
        copy.created_at = now;
        copy.updated_at = now;
        copy
    }

    /// Replaces the role-free people list.
    pub fn replace_people(&mut self, people: Vec<PersonId>, now: DateTime<Utc>) {
        self.people = people;
        self.updated_at = now;
    }

    /// Moves the task to the board owning `phase`, keeping its branch.
    pub fn move_to_phase(&mut self, new_phase: Phase, now: DateTime<Utc>) {
        self.board = phase::board_name_for_phase(&self.board, new_phase);
        self.fase = Some(Fase::InPhase(new_phase));
        self.updated_at = now;
    }
}
