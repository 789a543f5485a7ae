//! Static production-phase metadata.
//!
//! Work orders move through a fixed sequence of dubbing phases, each phase
//! represented by its own board. This module owns that ordered sequence,
//! the mapping from board names to phases, and the mapping from phases to
//! the role field considered "the current assignee" for automation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One step in the fixed dubbing production sequence.
///
/// Variant order is the production order; the derived [`Ord`] follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Project setup and scheduling.
    Kickoff,
    /// Gathering of source materials.
    Assets,
    /// Script translation.
    Translation,
    /// Lip-sync adaptation of the translated script.
    Adapting,
    /// Casting voice tests.
    VoiceTests,
    /// Studio recording.
    Recording,
    /// First mix pass in Bogota.
    Premix,
    /// Quality control of the premix.
    QcPremix,
    /// Recording of retakes flagged in QC.
    Retakes,
    /// Quality control of the retakes.
    QcRetakes,
    /// Final mix in Miami.
    Mix,
    /// Quality control of the final mix.
    QcMix,
    /// Mix fixes flagged in QC.
    MixRetakes,
    /// Packaging and delivery to the client.
    Deliveries,
}

/// All phases in production order.
pub const ALL_PHASES: [Phase; 14] = [
    Phase::Kickoff,
    Phase::Assets,
    Phase::Translation,
    Phase::Adapting,
    Phase::VoiceTests,
    Phase::Recording,
    Phase::Premix,
    Phase::QcPremix,
    Phase::Retakes,
    Phase::QcRetakes,
    Phase::Mix,
    Phase::QcMix,
    Phase::MixRetakes,
    Phase::Deliveries,
];

impl Phase {
    /// Returns the display label used in board names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kickoff => "Kickoff",
            Self::Assets => "Assets",
            Self::Translation => "Translation",
            Self::Adapting => "Adapting",
            Self::VoiceTests => "Voice Tests",
            Self::Recording => "Recording",
            Self::Premix => "Premix",
            Self::QcPremix => "QC Premix",
            Self::Retakes => "Retakes",
            Self::QcRetakes => "QC Retakes",
            Self::Mix => "Mix",
            Self::QcMix => "QC Mix",
            Self::MixRetakes => "Mix Retakes",
            Self::Deliveries => "Deliveries",
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kickoff => "kickoff",
            Self::Assets => "assets",
            Self::Translation => "translation",
            Self::Adapting => "adapting",
            Self::VoiceTests => "voice_tests",
            Self::Recording => "recording",
            Self::Premix => "premix",
            Self::QcPremix => "qc_premix",
            Self::Retakes => "retakes",
            Self::QcRetakes => "qc_retakes",
            Self::Mix => "mix",
            Self::QcMix => "qc_mix",
            Self::MixRetakes => "mix_retakes",
            Self::Deliveries => "deliveries",
        }
    }

    /// Returns the successor phase in production order, or `None` once the
    /// task has reached Deliveries.
    ///
    /// The authoritative advance decision belongs to the external
    /// advance-phase service; this lookup exists for adapters and display.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let index = ALL_PHASES.iter().position(|phase| *phase == self)?;
        ALL_PHASES.get(index + 1).copied()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<&str> for Phase {
    type Error = ParsePhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize(value).as_str() {
            "kickoff" => Ok(Self::Kickoff),
            "assets" => Ok(Self::Assets),
            "translation" => Ok(Self::Translation),
            "adapting" => Ok(Self::Adapting),
            "voicetests" => Ok(Self::VoiceTests),
            "recording" => Ok(Self::Recording),
            "premix" => Ok(Self::Premix),
            "qcpremix" => Ok(Self::QcPremix),
            "retakes" => Ok(Self::Retakes),
            "qcretakes" => Ok(Self::QcRetakes),
            "mix" => Ok(Self::Mix),
            "qcmix" => Ok(Self::QcMix),
            "mixretakes" => Ok(Self::MixRetakes),
            "deliveries" => Ok(Self::Deliveries),
            _ => Err(ParsePhaseError(value.to_owned())),
        }
    }
}

/// Error returned when a phase label cannot be recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown phase label: {0}")]
pub struct ParsePhaseError(pub String);

/// Lower-cases a label and strips every non-alphanumeric character, so that
/// `"QC Premix"`, `"qc-premix"`, and `"qc_premix"` all share one key.
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Extracts the phase from a composite board name.
///
/// Board names follow `<Branch>-<PhaseLabel>`; the portion after the first
/// `-` is the phase. A name without a separator is itself the phase, which
/// covers HQ/aggregate boards named directly after a phase.
///
/// # Errors
///
/// Returns [`ParsePhaseError`] when the phase portion is not a known label.
pub fn phase_for_board_name(name: &str) -> Result<Phase, ParsePhaseError> {
    let label = match name.split_once('-') {
        Some((_, phase_portion)) => phase_portion,
        None => name,
    };
    Phase::try_from(label)
}

/// Builds the board name a task lands on when it enters `phase`, keeping
/// the branch prefix of its current board.
#[must_use]
pub fn board_name_for_phase(current_board: &str, phase: Phase) -> String {
    match current_board.split_once('-') {
        Some((branch, _)) => format!("{branch}-{}", phase.label()),
        None => phase.label().to_owned(),
    }
}

/// A task role field holding zero-or-one assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleField {
    /// Project manager.
    ProjectManager,
    /// Recording director.
    Director,
    /// Recording technician.
    Tecnico,
    /// Premix QC reviewer.
    Qc1,
    /// Retakes QC reviewer.
    QcRetakes,
    /// Bogota mixer.
    MixerBogota,
    /// Miami mixer.
    MixerMiami,
    /// Mix QC reviewer.
    QcMix,
    /// Translator.
    Traductor,
    /// Script adapter.
    Adaptador,
}

/// All role fields a task carries.
pub const ALL_ROLE_FIELDS: [RoleField; 10] = [
    RoleField::ProjectManager,
    RoleField::Director,
    RoleField::Tecnico,
    RoleField::Qc1,
    RoleField::QcRetakes,
    RoleField::MixerBogota,
    RoleField::MixerMiami,
    RoleField::QcMix,
    RoleField::Traductor,
    RoleField::Adaptador,
];

impl RoleField {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectManager => "project_manager",
            Self::Director => "director",
            Self::Tecnico => "tecnico",
            Self::Qc1 => "qc1",
            Self::QcRetakes => "qc_retakes",
            Self::MixerBogota => "mixer_bogota",
            Self::MixerMiami => "mixer_miami",
            Self::QcMix => "qc_mix",
            Self::Traductor => "traductor",
            Self::Adaptador => "adaptador",
        }
    }
}

impl fmt::Display for RoleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the role field considered "the current assignee" when a task
/// enters `phase`.
///
/// Only a subset of phases carry an entry; entering any other phase simply
/// skips assignee-driven automation.
#[must_use]
pub const fn role_field_for_phase(phase: Phase) -> Option<RoleField> {
    match phase {
        Phase::Translation => Some(RoleField::Traductor),
        Phase::Adapting => Some(RoleField::Adaptador),
        Phase::Premix => Some(RoleField::MixerBogota),
        Phase::Mix => Some(RoleField::MixerMiami),
        Phase::QcPremix => Some(RoleField::Qc1),
        Phase::QcMix => Some(RoleField::QcMix),
        Phase::QcRetakes => Some(RoleField::QcRetakes),
        Phase::Kickoff
        | Phase::Assets
        | Phase::VoiceTests
        | Phase::Recording
        | Phase::Retakes
        | Phase::MixRetakes
        | Phase::Deliveries => None,
    }
}

/// Workflow stage recorded on a task's `fase` column.
///
/// Distinct from the board-derived phase: a task can sit on a phase board
/// while flagged on hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fase {
    /// Work is paused pending client input.
    OnHold,
    /// The task is actively in the given phase.
    InPhase(Phase),
}

impl Fase {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnHold => "on_hold",
            Self::InPhase(phase) => phase.as_str(),
        }
    }
}

impl TryFrom<&str> for Fase {
    type Error = ParsePhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if normalize(value) == "onhold" {
            return Ok(Self::OnHold);
        }
        Phase::try_from(value).map(Self::InPhase)
    }
}
