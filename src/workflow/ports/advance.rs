//! Advance-phase port.
//!
//! Phase advancement is an atomic server-side operation: which phase
//! follows which, and whether phase-specific prerequisites hold, is decided
//! behind this contract. The core only interprets the result.

use crate::phase::Phase;
use crate::workflow::domain::{PersonId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Successful advance-phase response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceReport {
    /// The phase the task now occupies.
    pub new_phase: Phase,
}

/// Contract for the external advance-phase service.
#[async_trait]
pub trait PhaseAdvancer: Send + Sync {
    /// Attempts to move a task to its next phase.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseAdvanceError::Rejected`] when the service declined
    /// the advance and [`PhaseAdvanceError::Transport`] when the call
    /// itself failed.
    async fn advance_phase(
        &self,
        task: TaskId,
        actor: PersonId,
    ) -> Result<AdvanceReport, PhaseAdvanceError>;
}

/// Errors returned by advance-phase implementations.
#[derive(Debug, Clone, Error)]
pub enum PhaseAdvanceError {
    /// The service processed the request and declined it.
    #[error("phase advance rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or answered out of protocol.
    #[error("phase advance transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl PhaseAdvanceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
