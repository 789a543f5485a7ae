//! Orchestration services for workflow mutation and access control.

pub mod access;
pub mod bulk;
pub mod mutation;
pub mod privacy;

pub use access::{POST_KICKOFF_EDITABLE, can_edit};
pub use bulk::{BulkMutationCoordinator, BulkOperation, BulkOutcome};
pub use mutation::{TaskMutationCoordinator, UpdateOutcome};
pub use privacy::{PrivacyAutomation, PrivacyError, PrivacyResult};
