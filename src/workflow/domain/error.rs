//! Error types for workflow domain parsing.

use thiserror::Error;

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing audit kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit kind: {0}")]
pub struct ParseAuditKindError(pub String);
