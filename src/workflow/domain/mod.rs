//! Domain model for workflow mutation and access control.
//!
//! The domain keeps every infrastructure concern outside the boundary:
//! persistence, phase advancement, guest lookup, and notification are all
//! port contracts consumed by the service layer.

mod actor;
mod audit;
mod change;
mod column;
mod error;
mod ids;
mod person;
mod roles;
mod status;
mod task;

pub use actor::{ActorContext, MembershipTier};
pub use audit::{AuditKind, AuditRecord};
pub use change::{FieldChange, RoleChanges, TaskChanges, TaskPatch};
pub use column::ColumnId;
pub use error::{ParseAuditKindError, ParseTaskStatusError};
pub use ids::{PersonId, TaskId};
pub use person::Person;
pub use roles::RoleAssignments;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
