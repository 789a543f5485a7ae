//! Tri-state field changes and typed task patches.
//!
//! Edits arriving from the UI must distinguish "this field was not touched"
//! from "this field was explicitly cleared". [`FieldChange`] makes that
//! distinction a type rather than a key-presence convention, and
//! [`TaskChanges::into_patch`] maps logical edits onto the persisted patch
//! field by field, so a new field cannot silently fall through unmapped.

use super::{Person, PersonId, TaskStatus};
use crate::phase::{ALL_ROLE_FIELDS, Fase, RoleField};
use chrono::{DateTime, NaiveDate, Utc};

/// A proposed change to a single optional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldChange<T> {
    /// The field was not part of the edit.
    #[default]
    Unchanged,
    /// The field is set to a new value.
    Set(T),
    /// The field is explicitly cleared.
    Clear,
}

impl<T> FieldChange<T> {
    /// Returns true when the field was not part of the edit.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the new value when the change sets one.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged | Self::Clear => None,
        }
    }

    /// Resolves the value the field would hold after applying this change
    /// on top of `current`.
    #[must_use]
    pub fn effective<'a>(&'a self, current: Option<&'a T>) -> Option<&'a T> {
        match self {
            Self::Unchanged => current,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }

    /// Applies this change to a stored optional field in place.
    pub fn apply_to(&self, field: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Self::Unchanged => {}
            Self::Set(value) => *field = Some(value.clone()),
            Self::Clear => *field = None,
        }
    }

    /// Maps the set value through `f`, preserving `Unchanged` and `Clear`.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldChange<U> {
        match self {
            Self::Unchanged => FieldChange::Unchanged,
            Self::Set(value) => FieldChange::Set(f(value)),
            Self::Clear => FieldChange::Clear,
        }
    }
}

/// Per-role-field changes, one tri-state slot per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChanges<T> {
    /// Project manager slot.
    pub project_manager: FieldChange<T>,
    /// Director slot.
    pub director: FieldChange<T>,
    /// Recording technician slot.
    pub tecnico: FieldChange<T>,
    /// Premix QC reviewer slot.
    pub qc1: FieldChange<T>,
    /// Retakes QC reviewer slot.
    pub qc_retakes: FieldChange<T>,
    /// Bogota mixer slot.
    pub mixer_bogota: FieldChange<T>,
    /// Miami mixer slot.
    pub mixer_miami: FieldChange<T>,
    /// Mix QC reviewer slot.
    pub qc_mix: FieldChange<T>,
    /// Translator slot.
    pub traductor: FieldChange<T>,
    /// Adapter slot.
    pub adaptador: FieldChange<T>,
}

/// Hand-written so the empty change set exists for any `T`; every slot is
/// `Unchanged`, which a derive would gate on `T: Default`.
impl<T> Default for RoleChanges<T> {
    fn default() -> Self {
        Self {
            project_manager: FieldChange::Unchanged,
            director: FieldChange::Unchanged,
            tecnico: FieldChange::Unchanged,
            qc1: FieldChange::Unchanged,
            qc_retakes: FieldChange::Unchanged,
            mixer_bogota: FieldChange::Unchanged,
            mixer_miami: FieldChange::Unchanged,
            qc_mix: FieldChange::Unchanged,
            traductor: FieldChange::Unchanged,
            adaptador: FieldChange::Unchanged,
        }
    }
}

impl<T> RoleChanges<T> {
    /// Returns the change slot for a role field.
    #[must_use]
    pub const fn get(&self, field: RoleField) -> &FieldChange<T> {
        match field {
            RoleField::ProjectManager => &self.project_manager,
            RoleField::Director => &self.director,
            RoleField::Tecnico => &self.tecnico,
            RoleField::Qc1 => &self.qc1,
            RoleField::QcRetakes => &self.qc_retakes,
            RoleField::MixerBogota => &self.mixer_bogota,
            RoleField::MixerMiami => &self.mixer_miami,
            RoleField::QcMix => &self.qc_mix,
            RoleField::Traductor => &self.traductor,
            RoleField::Adaptador => &self.adaptador,
        }
    }

    /// Sets the change slot for a role field.
    pub fn set(&mut self, field: RoleField, change: FieldChange<T>) {
        match field {
            RoleField::ProjectManager => self.project_manager = change,
            RoleField::Director => self.director = change,
            RoleField::Tecnico => self.tecnico = change,
            RoleField::Qc1 => self.qc1 = change,
            RoleField::QcRetakes => self.qc_retakes = change,
            RoleField::MixerBogota => self.mixer_bogota = change,
            RoleField::MixerMiami => self.mixer_miami = change,
            RoleField::QcMix => self.qc_mix = change,
            RoleField::Traductor => self.traductor = change,
            RoleField::Adaptador => self.adaptador = change,
        }
    }

    /// Iterates every role field alongside its change slot.
    pub fn entries(&self) -> impl Iterator<Item = (RoleField, &FieldChange<T>)> {
        ALL_ROLE_FIELDS.iter().map(|field| (*field, self.get(*field)))
    }

    /// Returns true when no role field is touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().all(|(_, change)| change.is_unchanged())
    }

    /// Maps every set value through `f`.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> RoleChanges<U> {
        RoleChanges {
            project_manager: self.project_manager.map(&mut f),
            director: self.director.map(&mut f),
            tecnico: self.tecnico.map(&mut f),
            qc1: self.qc1.map(&mut f),
            qc_retakes: self.qc_retakes.map(&mut f),
            mixer_bogota: self.mixer_bogota.map(&mut f),
            mixer_miami: self.mixer_miami.map(&mut f),
            qc_mix: self.qc_mix.map(&mut f),
            traductor: self.traductor.map(&mut f),
            adaptador: self.adaptador.map(&mut f),
        }
    }
}

/// The persisted shape of a task update, ready for the task store.
///
/// Role fields carry foreign-key person identifiers; workflow timestamps
/// are stamped by the mutation coordinator, never by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New workflow status, when the edit changes it.
    pub status: Option<TaskStatus>,
    /// Change to the recorded workflow stage.
    pub fase: FieldChange<Fase>,
    /// Change to the work-start timestamp.
    pub started_at: FieldChange<DateTime<Utc>>,
    /// Change to the completion timestamp.
    pub completed_at: FieldChange<DateTime<Utc>>,
    /// Change to the delivery date.
    pub date_delivered: FieldChange<NaiveDate>,
    /// Change to the guest assignment date.
    pub date_assigned: FieldChange<NaiveDate>,
    /// Change to the guest-facing due date.
    pub guest_due_date: FieldChange<NaiveDate>,
    /// Change to the Miami-branch due date.
    pub miami_due_date: FieldChange<NaiveDate>,
    /// Change to the client-facing due date.
    pub client_due_date: FieldChange<NaiveDate>,
    /// New privacy flag, when the edit changes it.
    pub is_private: Option<bool>,
    /// Role-field foreign-key changes.
    pub roles: RoleChanges<PersonId>,
}

impl TaskPatch {
    /// Returns true when the patch touches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
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
        } = self;
        status.is_none()
            && fase.is_unchanged()
            && started_at.is_unchanged()
            && completed_at.is_unchanged()
            && date_delivered.is_unchanged()
            && date_assigned.is_unchanged()
            && guest_due_date.is_unchanged()
            && miami_due_date.is_unchanged()
            && client_due_date.is_unchanged()
            && is_private.is_none()
            && roles.is_empty()
    }
}

/// A logical edit proposed against a task, as the UI expresses it.
///
/// Role fields carry full [`Person`] references; the people list uses
/// replace-all semantics (`None` means the list was not touched).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New workflow status, when the edit changes it.
    pub status: Option<TaskStatus>,
    /// Change to the recorded workflow stage.
    pub fase: FieldChange<Fase>,
    /// Change to the Miami-branch due date.
    pub miami_due_date: FieldChange<NaiveDate>,
    /// Change to the client-facing due date.
    pub client_due_date: FieldChange<NaiveDate>,
    /// New privacy flag, when the edit changes it.
    pub is_private: Option<bool>,
    /// Role-field assignment changes.
    pub roles: RoleChanges<Person>,
    /// Replacement people list; `None` leaves the list untouched.
    pub people: Option<Vec<Person>>,
}

impl TaskChanges {
    /// Maps the logical edit onto the persisted patch shape, extracting
    /// foreign-key identifiers from assigned people.
    ///
    /// Returns the patch together with the replace-all people list, which
    /// persists through a separate store call.
    #[must_use]
    pub fn into_patch(self) -> (TaskPatch, Option<Vec<Person>>) {
        let Self {
            status,
            fase,
            miami_due_date,
            client_due_date,
            is_private,
            roles,
            people,
        } = self;

        let patch = TaskPatch {
            status,
            fase,
            miami_due_date,
            client_due_date,
            is_private,
            roles: roles.map(|person| person.id()),
            ..TaskPatch::default()
        };
        (patch, people)
    }
}
