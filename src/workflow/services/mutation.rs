//! Single-task update pipeline.

use super::privacy::{PrivacyAutomation, PrivacyError};
use crate::workflow::{
    domain::{
        ActorContext, AuditRecord, FieldChange, Person, PersonId, Task, TaskChanges, TaskStatus,
    },
    ports::{
        AssignmentNotifier, CacheScope, PersonDirectory, PhaseAdvanceError, PhaseAdvancer,
        TaskStore, TaskStoreError, ViewCache,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Result of a single-task update.
///
/// Rejections and failures are outcome values, not errors: a user trying
/// to reopen a completed task is routine, not exceptional. The UI layer
/// chooses messaging per variant.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The update was applied in full.
    Applied,
    /// A cross-field constraint rejected the edit; nothing was persisted.
    RejectedValidation(String),
    /// The actor lacked the privilege to move a task out of done.
    RejectedStatusLock,
    /// A store write failed; the caller should revert optimistic state.
    PersistFailed(TaskStoreError),
    /// The status write persisted but phase advancement failed — a partial
    /// success the caller must surface distinctly.
    PhaseAdvanceFailed(PhaseAdvanceError),
}

/// The single-task update entry point.
///
/// Translates a logical edit into a persisted patch, applying the status
/// guard, privacy automation, people reconciliation, and done-triggered
/// phase advancement in strict order.
pub struct TaskMutationCoordinator<S, A, D, N, V, C>
where
    S: TaskStore,
    A: PhaseAdvancer,
    D: PersonDirectory,
    N: AssignmentNotifier,
    V: ViewCache,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    advancer: Arc<A>,
    privacy: PrivacyAutomation<S, D, N, C>,
    cache: Arc<V>,
    clock: Arc<C>,
}

impl<S, A, D, N, V, C> TaskMutationCoordinator<S, A, D, N, V, C>
where
    S: TaskStore,
    A: PhaseAdvancer,
    D: PersonDirectory,
    N: AssignmentNotifier,
    V: ViewCache,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        advancer: Arc<A>,
        privacy: PrivacyAutomation<S, D, N, C>,
        cache: Arc<V>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            advancer,
            privacy,
            cache,
            clock,
        }
    }

    /// Returns the privacy automation this coordinator runs.
    #[must_use]
    pub const fn privacy(&self) -> &PrivacyAutomation<S, D, N, C> {
        &self.privacy
    }

    /// Applies a proposed edit to a task.
    ///
    /// Pipeline, each step able to short-circuit: cross-field validation,
    /// status guard, field mapping, privacy automation (guest exposure, or
    /// the full public transition when the edit turns privacy off), people
    /// reconciliation, persistence, then phase advancement when the edit
    /// set the status to done.
    pub async fn apply_update(
        &self,
        task: &Task,
        changes: TaskChanges,
        actor: &ActorContext,
    ) -> UpdateOutcome {
        // 1. Cross-field validation.
        if let Some(reason) = validate_due_dates(task, &changes) {
            return UpdateOutcome::RejectedValidation(reason);
        }

        // 2. Status guard.
        let status_change = changes.status;
        if let Some(new_status) = status_change {
            let leaving_done = task.status() == TaskStatus::Done && new_status != TaskStatus::Done;
            if leaving_done && !actor.can_override_status_lock() {
                return UpdateOutcome::RejectedStatusLock;
            }
        }

        // 3. Field mapping, plus coordinator-stamped timestamps.
        let now = self.clock.utc();
        let becoming_private = changes.is_private == Some(true);
        let becoming_public = task.is_private() && changes.is_private == Some(false);
        let (mut patch, people) = changes.into_patch();
        if let Some(new_status) = status_change {
            if new_status == TaskStatus::Working && task.started_at().is_none() {
                patch.started_at = FieldChange::Set(now);
            }
            if new_status == TaskStatus::Done {
                patch.completed_at = FieldChange::Set(now);
                patch.date_delivered = FieldChange::Set(now.date_naive());
            }
        }

        // 4. Privacy automation. Turning privacy off runs the full public
        // transition (viewer purge plus guest role cleanup); otherwise each
        // freshly assigned role is checked for guest exposure.
        if becoming_public {
            if let Err(err) = self.privacy.make_task_public(task).await {
                return UpdateOutcome::PersistFailed(privacy_to_store_error(err));
            }
        } else {
            let freshly_assigned: Vec<PersonId> = patch
                .roles
                .entries()
                .filter_map(|(_, change)| change.as_set().copied())
                .collect();
            for person in freshly_assigned {
                if let Err(err) = self
                    .privacy
                    .maybe_expose_guest_viewer(task, person, becoming_private)
                    .await
                {
                    return UpdateOutcome::PersistFailed(privacy_to_store_error(err));
                }
            }
        }

        // 5. People-list reconciliation (replace-all plus audit).
        if let Some(new_people) = people {
            let new_ids: Vec<PersonId> = new_people.iter().map(Person::id).collect();
            if let Err(err) = self.store.replace_task_people(task.id(), &new_ids).await {
                return UpdateOutcome::PersistFailed(err);
            }
            let record = AuditRecord::people_change(task.id(), task.people(), &new_ids, now);
            if let Err(err) = self.store.insert_audit_record(&record).await {
                return UpdateOutcome::PersistFailed(err);
            }
        }

        // 6. Persist.
        if !patch.is_empty() {
            if let Err(err) = self.store.update_task(task.id(), &patch).await {
                return UpdateOutcome::PersistFailed(err);
            }
        }

        // 7. Phase advancement on done.
        if status_change == Some(TaskStatus::Done) {
            match self.advancer.advance_phase(task.id(), actor.person_id()).await {
                Ok(report) => {
                    let mut advanced = task.clone();
                    advanced.apply_patch(&patch, now);
                    advanced.move_to_phase(report.new_phase, now);
                    if let Err(err) = self.privacy.on_phase_entered(&advanced, report.new_phase).await
                    {
                        tracing::warn!(
                            task = %task.id(),
                            phase = %report.new_phase,
                            error = %err,
                            "phase-entry automation failed",
                        );
                    }
                    // Views of both boards changed: the task left one and
                    // landed on the other.
                    self.cache
                        .invalidate(CacheScope::Board(task.board().to_owned()))
                        .await;
                    if advanced.board() != task.board() {
                        self.cache
                            .invalidate(CacheScope::Board(advanced.board().to_owned()))
                            .await;
                    }
                }
                Err(err) => return UpdateOutcome::PhaseAdvanceFailed(err),
            }
        }

        UpdateOutcome::Applied
    }
}

/// The Miami due date may never be later than the client due date, checked
/// against the values the task would hold after the edit.
fn validate_due_dates(task: &Task, changes: &TaskChanges) -> Option<String> {
    let current_miami = task.miami_due_date();
    let current_client = task.client_due_date();
    let miami = changes.miami_due_date.effective(current_miami.as_ref());
    let client = changes.client_due_date.effective(current_client.as_ref());
    if let (Some(miami), Some(client)) = (miami, client) {
        if miami > client {
            return Some("Miami due date cannot be later than the client due date".to_owned());
        }
    }
    None
}

/// Folds a privacy failure into the store-failure outcome: both mean a
/// collaborator write did not land.
fn privacy_to_store_error(err: PrivacyError) -> TaskStoreError {
    match err {
        PrivacyError::Store(err) => err,
        PrivacyError::Directory(err) => TaskStoreError::persistence(err),
    }
}
