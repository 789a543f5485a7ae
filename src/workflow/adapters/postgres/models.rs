//! Diesel row models and typed change-set mapping for workflow persistence.

use super::schema::{audit_log, task_people, task_viewers, tasks};
use crate::workflow::domain::{AuditRecord, FieldChange, TaskPatch};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: Uuid,
    pub board: String,
    pub fase: Option<String>,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub date_delivered: Option<NaiveDate>,
    pub date_assigned: Option<NaiveDate>,
    pub guest_due_date: Option<NaiveDate>,
    pub miami_due_date: Option<NaiveDate>,
    pub client_due_date: Option<NaiveDate>,
    pub is_private: bool,
    pub project_manager: Option<Uuid>,
    pub director: Option<Uuid>,
    pub tecnico: Option<Uuid>,
    pub qc1: Option<Uuid>,
    pub qc_retakes: Option<Uuid>,
    pub mixer_bogota: Option<Uuid>,
    pub mixer_miami: Option<Uuid>,
    pub qc_mix: Option<Uuid>,
    pub traductor: Option<Uuid>,
    pub adaptador: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Builds the insert row for a duplicate of this task.
    ///
    /// The copy keeps board, stage, scheduling, and role data but gets a
    /// fresh identifier and fresh timestamps; people and viewers are not
    /// copied.
    #[must_use]
    pub fn duplicate(&self, new_id: Uuid, now: DateTime<Utc>) -> NewTaskRow {
        NewTaskRow {
            id: new_id,
            board: self.board.clone(),
            fase: self.fase.clone(),
            status: self.status.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            date_delivered: self.date_delivered,
            date_assigned: self.date_assigned,
            guest_due_date: self.guest_due_date,
            miami_due_date: self.miami_due_date,
            client_due_date: self.client_due_date,
            is_private: self.is_private,
            project_manager: self.project_manager,
            director: self.director,
            tecnico: self.tecnico,
            qc1: self.qc1,
            qc_retakes: self.qc_retakes,
            mixer_bogota: self.mixer_bogota,
            mixer_miami: self.mixer_miami,
            qc_mix: self.qc_mix,
            traductor: self.traductor,
            adaptador: self.adaptador,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub id: Uuid,
    pub board: String,
    pub fase: Option<String>,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub date_delivered: Option<NaiveDate>,
    pub date_assigned: Option<NaiveDate>,
    pub guest_due_date: Option<NaiveDate>,
    pub miami_due_date: Option<NaiveDate>,
    pub client_due_date: Option<NaiveDate>,
    pub is_private: bool,
    pub project_manager: Option<Uuid>,
    pub director: Option<Uuid>,
    pub tecnico: Option<Uuid>,
    pub qc1: Option<Uuid>,
    pub qc_retakes: Option<Uuid>,
    pub mixer_bogota: Option<Uuid>,
    pub mixer_miami: Option<Uuid>,
    pub qc_mix: Option<Uuid>,
    pub traductor: Option<Uuid>,
    pub adaptador: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed change set for task updates.
///
/// `None` skips a column; `Some(None)` writes NULL to a nullable column.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskRowPatch {
    pub board: Option<String>,
    pub fase: Option<Option<String>>,
    pub status: Option<String>,
    pub started_at: Option<Option<DateTime<Utc>>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub date_delivered: Option<Option<NaiveDate>>,
    pub date_assigned: Option<Option<NaiveDate>>,
    pub guest_due_date: Option<Option<NaiveDate>>,
    pub miami_due_date: Option<Option<NaiveDate>>,
    pub client_due_date: Option<Option<NaiveDate>>,
    pub is_private: Option<bool>,
    pub project_manager: Option<Option<Uuid>>,
    pub director: Option<Option<Uuid>>,
    pub tecnico: Option<Option<Uuid>>,
    pub qc1: Option<Option<Uuid>>,
    pub qc_retakes: Option<Option<Uuid>>,
    pub mixer_bogota: Option<Option<Uuid>>,
    pub mixer_miami: Option<Option<Uuid>>,
    pub qc_mix: Option<Option<Uuid>>,
    pub traductor: Option<Option<Uuid>>,
    pub adaptador: Option<Option<Uuid>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskRowPatch {
    /// Maps a domain patch onto column assignments, field by field.
    #[must_use]
    pub fn from_patch(patch: &TaskPatch, now: DateTime<Utc>) -> Self {
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

        Self {
            board: None,
            fase: nullable_column(&(*fase).map(|f| f.as_str().to_owned())),
            status: status.map(|s| s.as_str().to_owned()),
            started_at: nullable_column(started_at),
            completed_at: nullable_column(completed_at),
            date_delivered: nullable_column(date_delivered),
            date_assigned: nullable_column(date_assigned),
            guest_due_date: nullable_column(guest_due_date),
            miami_due_date: nullable_column(miami_due_date),
            client_due_date: nullable_column(client_due_date),
            is_private: *is_private,
            project_manager: role_column(&roles.project_manager),
            director: role_column(&roles.director),
            tecnico: role_column(&roles.tecnico),
            qc1: role_column(&roles.qc1),
            qc_retakes: role_column(&roles.qc_retakes),
            mixer_bogota: role_column(&roles.mixer_bogota),
            mixer_miami: role_column(&roles.mixer_miami),
            qc_mix: role_column(&roles.qc_mix),
            traductor: role_column(&roles.traductor),
            adaptador: role_column(&roles.adaptador),
            updated_at: Some(now),
        }
    }
}

/// Maps a tri-state change onto a nullable-column assignment.
fn nullable_column<T: Clone>(change: &FieldChange<T>) -> Option<Option<T>> {
    match change {
        FieldChange::Unchanged => None,
        FieldChange::Set(value) => Some(Some(value.clone())),
        FieldChange::Clear => Some(None),
    }
}

/// Maps a role-field change onto its foreign-key column assignment.
fn role_column(change: &FieldChange<crate::workflow::domain::PersonId>) -> Option<Option<Uuid>> {
    match change {
        FieldChange::Unchanged => None,
        FieldChange::Set(id) => Some(Some(id.into_inner())),
        FieldChange::Clear => Some(None),
    }
}

/// Membership row shared by the people and viewer tables.
#[derive(Debug, Clone, Copy, Queryable, Insertable)]
#[diesel(table_name = task_people)]
pub struct TaskPersonRow {
    pub task_id: Uuid,
    pub person_id: Uuid,
}

/// Viewer row for private tasks.
#[derive(Debug, Clone, Copy, Queryable, Insertable)]
#[diesel(table_name = task_viewers)]
pub struct TaskViewerRow {
    pub task_id: Uuid,
    pub person_id: Uuid,
}

/// Insert model for audit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_log)]
pub struct NewAuditRow {
    pub id: Uuid,
    pub task_id: Uuid,
    pub kind: String,
    pub detail: Value,
    pub recorded_at: DateTime<Utc>,
}

impl NewAuditRow {
    /// Builds the insert row for an audit record.
    #[must_use]
    pub fn from_record(record: &AuditRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id: record.task_id().into_inner(),
            kind: record.kind().as_str().to_owned(),
            detail: record.detail().clone(),
            recorded_at: record.recorded_at(),
        }
    }
}
