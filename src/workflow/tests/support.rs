//! Shared fixtures and port doubles for workflow tests.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::phase::Phase;
use crate::workflow::{
    adapters::memory::InMemoryTaskStore,
    domain::{AuditRecord, PersonId, Task, TaskId, TaskPatch},
    ports::{
        AdvanceReport, AssignmentNotifier, CacheScope, DirectoryError, NotifierError,
        PersonDirectory, PhaseAdvanceError, PhaseAdvancer, TaskStore, TaskStoreError,
        TaskStoreResult, ViewCache,
    },
};

/// Clock pinned to a single instant.
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Pins the clock to noon UTC on the given date.
    pub fn at_noon(date: NaiveDate) -> Self {
        let at = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"));
        Self::at(at)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.at.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Advance-phase double that reports a fixed next phase, with selected
/// tasks failing.
pub struct StubAdvancer {
    new_phase: Phase,
    rejecting: HashSet<TaskId>,
    calls: Mutex<Vec<TaskId>>,
}

impl StubAdvancer {
    pub fn advancing_to(new_phase: Phase) -> Self {
        Self {
            new_phase,
            rejecting: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn rejecting(mut self, ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.rejecting.extend(ids);
        self
    }

    pub fn calls(&self) -> Vec<TaskId> {
        self.calls.lock().expect("advancer call log lock").clone()
    }
}

#[async_trait]
impl PhaseAdvancer for StubAdvancer {
    async fn advance_phase(
        &self,
        task: TaskId,
        _actor: PersonId,
    ) -> Result<AdvanceReport, PhaseAdvanceError> {
        self.calls.lock().expect("advancer call log lock").push(task);
        if self.rejecting.contains(&task) {
            return Err(PhaseAdvanceError::Rejected(
                "phase prerequisites not met".to_owned(),
            ));
        }
        Ok(AdvanceReport {
            new_phase: self.new_phase,
        })
    }
}

/// Directory double backed by a static guest set.
#[derive(Default)]
pub struct StaticDirectory {
    guests: HashSet<PersonId>,
}

impl StaticDirectory {
    pub fn with_guests(guests: impl IntoIterator<Item = PersonId>) -> Self {
        Self {
            guests: guests.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PersonDirectory for StaticDirectory {
    async fn is_guest(&self, person: PersonId) -> Result<bool, DirectoryError> {
        Ok(self.guests.contains(&person))
    }
}

/// Notifier double that records dispatches and optionally fails them all.
#[derive(Default)]
pub struct RecordingNotifier {
    failing: bool,
    dispatched: Mutex<Vec<(PersonId, TaskId)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            dispatched: Mutex::new(Vec::new()),
        }
    }

    pub fn dispatched(&self) -> Vec<(PersonId, TaskId)> {
        self.dispatched.lock().expect("notifier log lock").clone()
    }
}

#[async_trait]
impl AssignmentNotifier for RecordingNotifier {
    async fn notify_assignment(
        &self,
        person: PersonId,
        task: TaskId,
        _message: &str,
    ) -> Result<(), NotifierError> {
        self.dispatched
            .lock()
            .expect("notifier log lock")
            .push((person, task));
        if self.failing {
            return Err(NotifierError::new(std::io::Error::other(
                "notification channel down",
            )));
        }
        Ok(())
    }
}

/// Cache double that records invalidation scopes.
#[derive(Default)]
pub struct RecordingCache {
    invalidations: Mutex<Vec<CacheScope>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidations(&self) -> Vec<CacheScope> {
        self.invalidations.lock().expect("cache log lock").clone()
    }
}

#[async_trait]
impl ViewCache for RecordingCache {
    async fn invalidate(&self, scope: CacheScope) {
        self.invalidations
            .lock()
            .expect("cache log lock")
            .push(scope);
    }
}

/// Store double whose task writes always fail; everything else delegates
/// to an in-memory store.
#[derive(Default)]
pub struct FailingUpdateStore {
    inner: InMemoryTaskStore,
}

impl FailingUpdateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for FailingUpdateStore {
    async fn update_task(&self, _id: TaskId, _patch: &TaskPatch) -> TaskStoreResult<()> {
        Err(TaskStoreError::persistence(std::io::Error::other(
            "task write rejected",
        )))
    }

    async fn batch_update_tasks(&self, _ids: &[TaskId], _patch: &TaskPatch) -> TaskStoreResult<()> {
        Err(TaskStoreError::persistence(std::io::Error::other(
            "batch write rejected",
        )))
    }

    async fn replace_task_people(
        &self,
        id: TaskId,
        people: &[PersonId],
    ) -> TaskStoreResult<()> {
        self.inner.replace_task_people(id, people).await
    }

    async fn insert_audit_record(&self, record: &AuditRecord) -> TaskStoreResult<()> {
        self.inner.insert_audit_record(record).await
    }

    async fn insert_viewer(&self, task: TaskId, person: PersonId) -> TaskStoreResult<()> {
        self.inner.insert_viewer(task, person).await
    }

    async fn list_viewers(&self, task: TaskId) -> TaskStoreResult<Vec<PersonId>> {
        self.inner.list_viewers(task).await
    }

    async fn clear_viewers(&self, task: TaskId) -> TaskStoreResult<()> {
        self.inner.clear_viewers(task).await
    }

    async fn duplicate_task(&self, id: TaskId) -> TaskStoreResult<TaskId> {
        self.inner.duplicate_task(id).await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_task(id).await
    }

    async fn move_task_to_phase(&self, id: TaskId, phase: Phase) -> TaskStoreResult<()> {
        self.inner.move_task_to_phase(id, phase).await
    }
}

/// A date that falls on a Tuesday, used as the default "today" in tests.
pub fn a_tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid calendar date")
}

/// Creates a task on the given board.
pub fn task_on_board(board: &str) -> Task {
    Task::new_on_board(board, Utc::now())
}
