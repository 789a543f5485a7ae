//! `PostgreSQL` task store implementation.

use super::{
    models::{NewAuditRow, TaskPersonRow, TaskRow, TaskRowPatch, TaskViewerRow},
    schema::{audit_log, task_people, task_viewers, tasks},
};
use crate::phase::{self, Phase};
use crate::workflow::{
    domain::{AuditRecord, PersonId, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: WorkflowPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let row_patch = TaskRowPatch::from_patch(patch, Utc::now());
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&row_patch)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn batch_update_tasks(&self, ids: &[TaskId], patch: &TaskPatch) -> TaskStoreResult<()> {
        if ids.is_empty() || patch.is_empty() {
            return Ok(());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        let row_patch = TaskRowPatch::from_patch(patch, Utc::now());
        self.run_blocking(move |connection| {
            diesel::update(tasks::table.filter(tasks::id.eq_any(uuids)))
                .set(&row_patch)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn replace_task_people(
        &self,
        id: TaskId,
        people: &[PersonId],
    ) -> TaskStoreResult<()> {
        let task_uuid = id.into_inner();
        let rows: Vec<TaskPersonRow> = people
            .iter()
            .map(|person| TaskPersonRow {
                task_id: task_uuid,
                person_id: person.into_inner(),
            })
            .collect();
        self.run_blocking(move |connection| {
            connection
                .transaction(|connection| {
                    diesel::delete(
                        task_people::table.filter(task_people::task_id.eq(task_uuid)),
                    )
                    .execute(connection)?;
                    diesel::insert_into(task_people::table)
                        .values(&rows)
                        .execute(connection)?;
                    Ok::<_, diesel::result::Error>(())
                })
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn insert_audit_record(&self, record: &AuditRecord) -> TaskStoreResult<()> {
        let row = NewAuditRow::from_record(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(audit_log::table)
                .values(&row)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn insert_viewer(&self, task: TaskId, person: PersonId) -> TaskStoreResult<()> {
        let row = TaskViewerRow {
            task_id: task.into_inner(),
            person_id: person.into_inner(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_viewers::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_viewers(&self, task: TaskId) -> TaskStoreResult<Vec<PersonId>> {
        let task_uuid = task.into_inner();
        self.run_blocking(move |connection| {
            let ids = task_viewers::table
                .filter(task_viewers::task_id.eq(task_uuid))
                .select(task_viewers::person_id)
                .load::<Uuid>(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(ids.into_iter().map(PersonId::from_uuid).collect())
        })
        .await
    }

    async fn clear_viewers(&self, task: TaskId) -> TaskStoreResult<()> {
        let task_uuid = task.into_inner();
        self.run_blocking(move |connection| {
            diesel::delete(task_viewers::table.filter(task_viewers::task_id.eq(task_uuid)))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn duplicate_task(&self, id: TaskId) -> TaskStoreResult<TaskId> {
        let source_uuid = id.into_inner();
        let copy_id = TaskId::new();
        let copy_uuid = copy_id.into_inner();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(source_uuid))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?
                .ok_or(TaskStoreError::NotFound(id))?;
            let copy = row.duplicate(copy_uuid, Utc::now());
            diesel::insert_into(tasks::table)
                .values(&copy)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(copy_id)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let task_uuid = id.into_inner();
        self.run_blocking(move |connection| {
            let deleted = connection
                .transaction(|connection| {
                    diesel::delete(
                        task_viewers::table.filter(task_viewers::task_id.eq(task_uuid)),
                    )
                    .execute(connection)?;
                    diesel::delete(
                        task_people::table.filter(task_people::task_id.eq(task_uuid)),
                    )
                    .execute(connection)?;
                    diesel::delete(tasks::table.filter(tasks::id.eq(task_uuid)))
                        .execute(connection)
                })
                .map_err(TaskStoreError::persistence)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn move_task_to_phase(&self, id: TaskId, target: Phase) -> TaskStoreResult<()> {
        let task_uuid = id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction(|connection| {
                    let board = tasks::table
                        .filter(tasks::id.eq(task_uuid))
                        .select(tasks::board)
                        .first::<String>(connection)
                        .optional()?;
                    let Some(board) = board else {
                        return Ok(None);
                    };
                    let new_board = phase::board_name_for_phase(&board, target);
                    diesel::update(tasks::table.filter(tasks::id.eq(task_uuid)))
                        .set((
                            tasks::board.eq(new_board),
                            tasks::fase.eq(Some(target.as_str().to_owned())),
                            tasks::updated_at.eq(Utc::now()),
                        ))
                        .execute(connection)?;
                    Ok::<_, diesel::result::Error>(Some(()))
                })
                .map_err(TaskStoreError::persistence)?
                .ok_or(TaskStoreError::NotFound(id))
        })
        .await
    }
}
