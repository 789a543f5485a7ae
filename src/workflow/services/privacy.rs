//! Guest-viewer exposure and privacy side effects.

use crate::calendar;
use crate::phase::{self, Phase};
use crate::workflow::{
    domain::{FieldChange, PersonId, Task, TaskPatch},
    ports::{
        AssignmentNotifier, DirectoryError, PersonDirectory, TaskStore, TaskStoreError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by privacy automation.
#[derive(Debug, Error)]
pub enum PrivacyError {
    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// Guest lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for privacy automation operations.
pub type PrivacyResult<T> = Result<T, PrivacyError>;

/// Automation that keeps private tasks consistent with their guest
/// assignees: viewer exposure, guest scheduling dates, and the cleanup run
/// when a task goes public.
pub struct PrivacyAutomation<S, D, N, C>
where
    S: TaskStore,
    D: PersonDirectory,
    N: AssignmentNotifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    directory: Arc<D>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<S, D, N, C> PrivacyAutomation<S, D, N, C>
where
    S: TaskStore,
    D: PersonDirectory,
    N: AssignmentNotifier,
    C: Clock + Send + Sync,
{
    /// Creates the automation service.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            notifier,
            clock,
        }
    }

    /// Exposes a newly assigned guest as a viewer of a private task.
    ///
    /// Acts only when the task is private (or becoming private in the same
    /// update, signalled via `becoming_private`) and the person is a guest.
    /// Idempotent: an existing viewer is left untouched. On exposure the
    /// task receives `date_assigned = today` and a guest due date on the
    /// next working day, and an assignment notification is dispatched
    /// best-effort.
    ///
    /// Returns true when the person was newly exposed.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyError`] when the guest lookup or a store write
    /// fails. Notification failures are logged, never returned.
    pub async fn maybe_expose_guest_viewer(
        &self,
        task: &Task,
        person: PersonId,
        becoming_private: bool,
    ) -> PrivacyResult<bool> {
        if !task.is_private() && !becoming_private {
            return Ok(false);
        }
        if !self.directory.is_guest(person).await? {
            return Ok(false);
        }
        let viewers = self.store.list_viewers(task.id()).await?;
        if viewers.contains(&person) {
            return Ok(false);
        }

        self.store.insert_viewer(task.id(), person).await?;

        let today = self.clock.utc().date_naive();
        let patch = TaskPatch {
            date_assigned: FieldChange::Set(today),
            guest_due_date: FieldChange::Set(calendar::next_business_day(today, 1)),
            ..TaskPatch::default()
        };
        self.store.update_task(task.id(), &patch).await?;

        let message = format!("You have a new assignment on {}", task.board());
        if let Err(err) = self
            .notifier
            .notify_assignment(person, task.id(), &message)
            .await
        {
            tracing::warn!(
                task = %task.id(),
                person = %person,
                error = %err,
                "assignment notification failed",
            );
        }
        Ok(true)
    }

    /// Turns privacy off for a task.
    ///
    /// Clears the viewer set, and clears every role field whose assignee
    /// was a viewer: a guest's role assignment has no meaning once the
    /// task is no longer scoped to them. Assignees who were never viewers
    /// keep their roles.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyError::Store`] when a store operation fails.
    pub async fn make_task_public(&self, task: &Task) -> PrivacyResult<()> {
        let viewers = self.store.list_viewers(task.id()).await?;

        let mut patch = TaskPatch {
            is_private: Some(false),
            ..TaskPatch::default()
        };
        for (field, assignee) in task.roles().assigned() {
            if viewers.contains(&assignee) {
                patch.roles.set(field, FieldChange::Clear);
            }
        }

        self.store.clear_viewers(task.id()).await?;
        self.store.update_task(task.id(), &patch).await?;
        Ok(())
    }

    /// Runs assignee automation for a task that just entered `new_phase`.
    ///
    /// A thin dispatcher: when the phase maps to a canonical role field and
    /// that field holds an assignee, the assignee gets the same
    /// privacy/due-date treatment an inline role edit would trigger. Who
    /// gets assigned is decided elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyError`] when the underlying exposure fails.
    pub async fn on_phase_entered(&self, task: &Task, new_phase: Phase) -> PrivacyResult<bool> {
        let Some(field) = phase::role_field_for_phase(new_phase) else {
            return Ok(false);
        };
        let Some(assignee) = task.roles().get(field) else {
            return Ok(false);
        };
        self.maybe_expose_guest_viewer(task, assignee, false).await
    }
}
