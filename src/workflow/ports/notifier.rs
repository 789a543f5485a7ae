//! Assignment-notification port.

use crate::workflow::domain::{PersonId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Contract for dispatching assignment notifications.
///
/// Delivery is best-effort: callers log failures and never let them roll
/// back the mutation that triggered the notification.
#[async_trait]
pub trait AssignmentNotifier: Send + Sync {
    /// Notifies a person that they were assigned to a task.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when dispatch fails.
    async fn notify_assignment(
        &self,
        person: PersonId,
        task: TaskId,
        message: &str,
    ) -> Result<(), NotifierError>;
}

/// Error returned by notifier implementations.
#[derive(Debug, Clone, Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifierError(Arc<dyn std::error::Error + Send + Sync>);

impl NotifierError {
    /// Wraps a dispatch error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
