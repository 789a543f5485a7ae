//! Person-directory port for guest lookup.

use crate::workflow::domain::PersonId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Contract for resolving whether a person is an external collaborator.
///
/// The answer derives from stored contact data (for example, absence of an
/// internal email domain); the core treats it as opaque.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Returns true when the person is a guest.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the lookup fails.
    async fn is_guest(&self, person: PersonId) -> Result<bool, DirectoryError>;
}

/// Error returned by person-directory implementations.
#[derive(Debug, Clone, Error)]
#[error("person directory lookup failed: {0}")]
pub struct DirectoryError(Arc<dyn std::error::Error + Send + Sync>);

impl DirectoryError {
    /// Wraps a lookup error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
