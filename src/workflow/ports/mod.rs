//! Port contracts for workflow orchestration.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services.

pub mod advance;
pub mod cache;
pub mod directory;
pub mod notifier;
pub mod store;

pub use advance::{AdvanceReport, PhaseAdvanceError, PhaseAdvancer};
pub use cache::{CacheScope, ViewCache};
pub use directory::{DirectoryError, PersonDirectory};
pub use notifier::{AssignmentNotifier, NotifierError};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
