//! Diesel schema for workflow persistence.

diesel::table! {
    /// Work orders, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Name of the board the task lives on.
        #[max_length = 255]
        board -> Varchar,
        /// Workflow stage recorded on the `fase` column.
        #[max_length = 50]
        fase -> Nullable<Varchar>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// When work started.
        started_at -> Nullable<Timestamptz>,
        /// When the task was completed.
        completed_at -> Nullable<Timestamptz>,
        /// Delivery date.
        date_delivered -> Nullable<Date>,
        /// Date the current guest assignee was given the task.
        date_assigned -> Nullable<Date>,
        /// Guest-facing due date.
        guest_due_date -> Nullable<Date>,
        /// Miami-branch due date.
        miami_due_date -> Nullable<Date>,
        /// Client-facing due date.
        client_due_date -> Nullable<Date>,
        /// Whether the task is visible only to explicit viewers.
        is_private -> Bool,
        /// Assigned project manager.
        project_manager -> Nullable<Uuid>,
        /// Assigned director.
        director -> Nullable<Uuid>,
        /// Assigned recording technician.
        tecnico -> Nullable<Uuid>,
        /// Assigned premix QC reviewer.
        qc1 -> Nullable<Uuid>,
        /// Assigned retakes QC reviewer.
        qc_retakes -> Nullable<Uuid>,
        /// Assigned Bogota mixer.
        mixer_bogota -> Nullable<Uuid>,
        /// Assigned Miami mixer.
        mixer_miami -> Nullable<Uuid>,
        /// Assigned mix QC reviewer.
        qc_mix -> Nullable<Uuid>,
        /// Assigned translator.
        traductor -> Nullable<Uuid>,
        /// Assigned adapter.
        adaptador -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role-free people list, replace-all semantics.
    task_people (task_id, person_id) {
        /// Owning task.
        task_id -> Uuid,
        /// Listed person.
        person_id -> Uuid,
    }
}

diesel::table! {
    /// Viewers granted visibility of private tasks.
    task_viewers (task_id, person_id) {
        /// Owning task.
        task_id -> Uuid,
        /// Granted person.
        person_id -> Uuid,
    }
}

diesel::table! {
    /// Audited task changes.
    audit_log (id) {
        /// Record identifier.
        id -> Uuid,
        /// Audited task.
        task_id -> Uuid,
        /// Change classification.
        #[max_length = 50]
        kind -> Varchar,
        /// Structured change detail.
        detail -> Jsonb,
        /// When the change was recorded.
        recorded_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, task_people, task_viewers, audit_log);
