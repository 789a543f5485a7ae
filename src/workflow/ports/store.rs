//! Task-store port for persistence of tasks, viewers, people, and audits.

use crate::phase::Phase;
use crate::workflow::domain::{AuditRecord, PersonId, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract for work orders.
///
/// The store owns its own write consistency; the core performs no
/// optimistic-concurrency checks and the last writer wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Applies a patch to one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()>;

    /// Applies one patch to every listed task in a single batched write.
    async fn batch_update_tasks(&self, ids: &[TaskId], patch: &TaskPatch) -> TaskStoreResult<()>;

    /// Replaces the role-free people list of a task (replace-all, not an
    /// incremental patch).
    async fn replace_task_people(
        &self,
        id: TaskId,
        people: &[PersonId],
    ) -> TaskStoreResult<()>;

    /// Appends an audit record.
    async fn insert_audit_record(&self, record: &AuditRecord) -> TaskStoreResult<()>;

    /// Grants a person visibility of a private task.
    async fn insert_viewer(&self, task: TaskId, person: PersonId) -> TaskStoreResult<()>;

    /// Lists the people granted visibility of a private task.
    async fn list_viewers(&self, task: TaskId) -> TaskStoreResult<Vec<PersonId>>;

    /// Removes every viewer of a task.
    async fn clear_viewers(&self, task: TaskId) -> TaskStoreResult<()>;

    /// Duplicates a task onto its own board, returning the copy's id.
    ///
    /// The copy starts with fresh collaboration state: no viewers and an
    /// empty people list.
    async fn duplicate_task(&self, id: TaskId) -> TaskStoreResult<TaskId>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Moves a task to the board owning `phase`, keeping its branch.
    async fn move_task_to_phase(&self, id: TaskId, phase: Phase) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
