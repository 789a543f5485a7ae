//! Board column identifiers for edit-permission checks.

use crate::phase::RoleField;

/// A board column a user can attempt to edit.
///
/// Production-metadata columns (client, language, notes, runtime) are listed
/// so permission checks cover them, even though the core does not interpret
/// their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// Workflow status.
    Status,
    /// Recorded workflow stage.
    Fase,
    /// Role-free people list.
    People,
    /// Privacy flag.
    IsPrivate,
    /// Guest assignment date.
    DateAssigned,
    /// Guest-facing due date.
    GuestDueDate,
    /// Miami-branch due date.
    MiamiDueDate,
    /// Client-facing due date.
    ClientDueDate,
    /// Delivery date.
    DateDelivered,
    /// Client name.
    Client,
    /// Target language.
    Language,
    /// Episode runtime.
    Runtime,
    /// Free-form notes.
    Notes,
    /// One of the role-field columns.
    Role(RoleField),
}
