//! Bulk fan-out of semantic operations across selected tasks.

use super::privacy::PrivacyAutomation;
use crate::phase::Phase;
use crate::workflow::{
    domain::{ActorContext, FieldChange, Task, TaskId, TaskPatch, TaskStatus},
    ports::{
        AssignmentNotifier, CacheScope, PersonDirectory, PhaseAdvancer, TaskStore,
        TaskStoreError, ViewCache,
    },
};
use futures::future::join_all;
use mockable::Clock;
use std::sync::Arc;

/// A semantic operation applied to every selected task.
#[derive(Debug, Clone)]
pub enum BulkOperation {
    /// Copy each task onto its own board.
    Duplicate,
    /// Delete each task.
    Delete,
    /// Move each task to the board owning the given phase.
    MoveToPhase(Phase),
    /// Apply one patch to each task.
    SetField(TaskPatch),
    /// Mark each task done and advance it to its next phase.
    MarkDone,
}

/// Aggregate result of a bulk operation.
///
/// Individual failures never abort the batch; they are counted here and
/// logged for operator diagnosis, not surfaced one by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Number of tasks the operation was attempted on.
    pub attempted: usize,
    /// Number of tasks the operation fully succeeded for.
    pub succeeded: usize,
    /// Tasks the operation failed for.
    pub failed: Vec<TaskId>,
    /// User-facing aggregate report, e.g. `"Moved 3 of 5 tasks to next
    /// phase"`.
    pub report: String,
}

/// Fans one semantic operation out across many tasks, replaying the same
/// phase-advancement and automation rules as the single-task path.
pub struct BulkMutationCoordinator<S, A, D, N, V, C>
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

impl<S, A, D, N, V, C> BulkMutationCoordinator<S, A, D, N, V, C>
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

    /// Applies `operation` to every task in `tasks`.
    ///
    /// Dependent views are invalidated exactly once after the whole batch
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] only when the initial batched write of a
    /// mark-done operation fails, in which case nothing was applied.
    /// Per-task failures are reported through [`BulkOutcome`] instead.
    pub async fn apply_bulk(
        &self,
        operation: BulkOperation,
        tasks: &[Task],
        actor: &ActorContext,
    ) -> Result<BulkOutcome, TaskStoreError> {
        let outcome = match &operation {
            BulkOperation::MarkDone => self.mark_done(tasks, actor).await?,
            other => self.fan_out(other, tasks).await,
        };
        self.cache.invalidate(CacheScope::AllBoards).await;
        Ok(outcome)
    }

    /// Marks every task done in one batched write, then advances each task
    /// concurrently.
    ///
    /// The done-write is deliberately not rolled back when advancement
    /// fails: those tasks stay done on their original phase board, and the
    /// failed ids are logged for reconciliation.
    async fn mark_done(
        &self,
        tasks: &[Task],
        actor: &ActorContext,
    ) -> Result<BulkOutcome, TaskStoreError> {
        let now = self.clock.utc();
        let ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            completed_at: FieldChange::Set(now),
            ..TaskPatch::default()
        };
        self.store.batch_update_tasks(&ids, &patch).await?;

        // Fan the advance calls out concurrently; results resolve in any
        // order and no task depends on another.
        let advances = tasks.iter().map(|task| async move {
            (
                task,
                self.advancer.advance_phase(task.id(), actor.person_id()).await,
            )
        });
        let mut advanced: Vec<(&Task, Phase)> = Vec::new();
        let mut failed: Vec<TaskId> = Vec::new();
        for (task, result) in join_all(advances).await {
            match result {
                Ok(report) => advanced.push((task, report.new_phase)),
                Err(err) => {
                    tracing::warn!(
                        task = %task.id(),
                        error = %err,
                        "bulk phase advance failed; task left done on its original board",
                    );
                    failed.push(task.id());
                }
            }
        }

        let automations = advanced.iter().map(|(task, new_phase)| async move {
            let mut entered = (*task).clone();
            entered.move_to_phase(*new_phase, now);
            if let Err(err) = self.privacy.on_phase_entered(&entered, *new_phase).await {
                tracing::warn!(
                    task = %task.id(),
                    phase = %new_phase,
                    error = %err,
                    "phase-entry automation failed",
                );
            }
        });
        join_all(automations).await;

        let succeeded = advanced.len();
        Ok(BulkOutcome {
            attempted: tasks.len(),
            succeeded,
            failed,
            report: format!("Moved {succeeded} of {} tasks to next phase", tasks.len()),
        })
    }

    /// Fans a single persistence call out across the tasks.
    async fn fan_out(&self, operation: &BulkOperation, tasks: &[Task]) -> BulkOutcome {
        let calls = tasks.iter().map(|task| async move {
            let result = match operation {
                BulkOperation::Duplicate => {
                    self.store.duplicate_task(task.id()).await.map(|_| ())
                }
                BulkOperation::Delete => self.store.delete_task(task.id()).await,
                BulkOperation::MoveToPhase(phase) => {
                    self.store.move_task_to_phase(task.id(), *phase).await
                }
                BulkOperation::SetField(patch) => self.store.update_task(task.id(), patch).await,
                // MarkDone takes the batched path in `apply_bulk`.
                BulkOperation::MarkDone => Ok(()),
            };
            (task.id(), result)
        });

        let mut failed: Vec<TaskId> = Vec::new();
        for (task_id, result) in join_all(calls).await {
            if let Err(err) = result {
                tracing::warn!(task = %task_id, error = %err, "bulk operation failed for task");
                failed.push(task_id);
            }
        }

        let succeeded = tasks.len() - failed.len();
        let report = match operation {
            BulkOperation::Duplicate => format!("Duplicated {succeeded} of {} tasks", tasks.len()),
            BulkOperation::Delete => format!("Deleted {succeeded} of {} tasks", tasks.len()),
            BulkOperation::MoveToPhase(phase) => {
                format!("Moved {succeeded} of {} tasks to {phase}", tasks.len())
            }
            BulkOperation::SetField(_) | BulkOperation::MarkDone => {
                format!("Updated {succeeded} of {} tasks", tasks.len())
            }
        };
        BulkOutcome {
            attempted: tasks.len(),
            succeeded,
            failed,
            report,
        }
    }
}
