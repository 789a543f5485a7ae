//! Role-field assignments held by a task.

use super::PersonId;
use crate::phase::{ALL_ROLE_FIELDS, RoleField};
use serde::{Deserialize, Serialize};

/// The fixed set of role fields on a task, each holding zero-or-one
/// assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignments {
    /// Assigned project manager.
    pub project_manager: Option<PersonId>,
    /// Assigned recording director.
    pub director: Option<PersonId>,
    /// Assigned recording technician.
    pub tecnico: Option<PersonId>,
    /// Assigned premix QC reviewer.
    pub qc1: Option<PersonId>,
    /// Assigned retakes QC reviewer.
    pub qc_retakes: Option<PersonId>,
    /// Assigned Bogota mixer.
    pub mixer_bogota: Option<PersonId>,
    /// Assigned Miami mixer.
    pub mixer_miami: Option<PersonId>,
    /// Assigned mix QC reviewer.
    pub qc_mix: Option<PersonId>,
    /// Assigned translator.
    pub traductor: Option<PersonId>,
    /// Assigned script adapter.
    pub adaptador: Option<PersonId>,
}

impl RoleAssignments {
    /// Returns the assignee of a role field.
    #[must_use]
    pub const fn get(&self, field: RoleField) -> Option<PersonId> {
        match field {
            RoleField::ProjectManager => self.project_manager,
            RoleField::Director => self.director,
            RoleField::Tecnico => self.tecnico,
            RoleField::Qc1 => self.qc1,
            RoleField::QcRetakes => self.qc_retakes,
            RoleField::MixerBogota => self.mixer_bogota,
            RoleField::MixerMiami => self.mixer_miami,
            RoleField::QcMix => self.qc_mix,
            RoleField::Traductor => self.traductor,
            RoleField::Adaptador => self.adaptador,
        }
    }

    /// Sets or clears the assignee of a role field.
    pub fn set(&mut self, field: RoleField, assignee: Option<PersonId>) {
        match field {
            RoleField::ProjectManager => self.project_manager = assignee,
            RoleField::Director => self.director = assignee,
            RoleField::Tecnico => self.tecnico = assignee,
            RoleField::Qc1 => self.qc1 = assignee,
            RoleField::QcRetakes => self.qc_retakes = assignee,
            RoleField::MixerBogota => self.mixer_bogota = assignee,
            RoleField::MixerMiami => self.mixer_miami = assignee,
            RoleField::QcMix => self.qc_mix = assignee,
            RoleField::Traductor => self.traductor = assignee,
            RoleField::Adaptador => self.adaptador = assignee,
        }
    }

    /// Returns the assigned project manager, if any.
    #[must_use]
    pub const fn project_manager(&self) -> Option<PersonId> {
        self.project_manager
    }

    /// Iterates every role field alongside its assignee.
    pub fn entries(&self) -> impl Iterator<Item = (RoleField, Option<PersonId>)> + '_ {
        ALL_ROLE_FIELDS.iter().map(|field| (*field, self.get(*field)))
    }

    /// Iterates the role fields that currently hold an assignee.
    pub fn assigned(&self) -> impl Iterator<Item = (RoleField, PersonId)> + '_ {
        self.entries()
            .filter_map(|(field, assignee)| assignee.map(|id| (field, id)))
    }
}
