//! In-memory task store for tests and local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::phase::Phase;
use crate::workflow::{
    domain::{AuditRecord, PersonId, Task, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Keeps whole task aggregates plus the viewer and audit side tables,
/// mirroring the shape the production store persists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    viewers: HashMap<TaskId, Vec<PersonId>>,
    audits: Vec<AuditRecord>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a task into the store.
    pub fn insert_task(&self, task: Task) {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.tasks.insert(task.id(), task);
    }

    /// Returns the stored task, if present.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.tasks.get(&id).cloned()
    }

    /// Returns the viewer set of a task.
    #[must_use]
    pub fn viewers(&self, id: TaskId) -> Vec<PersonId> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.viewers.get(&id).cloned().unwrap_or_default()
    }

    /// Returns every audit record recorded so far.
    #[must_use]
    pub fn audit_records(&self) -> Vec<AuditRecord> {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.audits.clone()
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        let state = self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.tasks.len()
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply_patch(patch, Utc::now());
        Ok(())
    }

    async fn batch_update_tasks(&self, ids: &[TaskId], patch: &TaskPatch) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        // Whole batch or nothing: verify every id before touching any task.
        for id in ids {
            if !state.tasks.contains_key(id) {
                return Err(TaskStoreError::NotFound(*id));
            }
        }
        let now = Utc::now();
        for id in ids {
            if let Some(task) = state.tasks.get_mut(id) {
                task.apply_patch(patch, now);
            }
        }
        Ok(())
    }

    async fn replace_task_people(
        &self,
        id: TaskId,
        people: &[PersonId],
    ) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.replace_people(people.to_vec(), Utc::now());
        Ok(())
    }

    async fn insert_audit_record(&self, record: &AuditRecord) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.audits.push(record.clone());
        Ok(())
    }

    async fn insert_viewer(&self, task: TaskId, person: PersonId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let viewers = state.viewers.entry(task).or_default();
        if !viewers.contains(&person) {
            viewers.push(person);
        }
        Ok(())
    }

    async fn list_viewers(&self, task: TaskId) -> TaskStoreResult<Vec<PersonId>> {
        let state = self.read()?;
        Ok(state.viewers.get(&task).cloned().unwrap_or_default())
    }

    async fn clear_viewers(&self, task: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.viewers.remove(&task);
        Ok(())
    }

    async fn duplicate_task(&self, id: TaskId) -> TaskStoreResult<TaskId> {
        let mut state = self.write()?;
        let copy = state
            .tasks
            .get(&id)
            .ok_or(TaskStoreError::NotFound(id))?
            .duplicate(Utc::now());
        let copy_id = copy.id();
        state.tasks.insert(copy_id, copy);
        Ok(copy_id)
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        state.viewers.remove(&id);
        Ok(())
    }

    async fn move_task_to_phase(&self, id: TaskId, phase: Phase) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.move_to_phase(phase, Utc::now());
        Ok(())
    }
}
