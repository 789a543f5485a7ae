//! Column-level edit authorization.

use crate::workflow::domain::{ActorContext, ColumnId, MembershipTier, Task};

/// Columns that remain editable by any team member once a task has left
/// its initial stages.
///
/// Everything else turns read-only post-kickoff for non-PM team members,
/// so mid-production schedule and assignment data stays in the hands of
/// the task's project manager.
pub const POST_KICKOFF_EDITABLE: [ColumnId; 4] = [
    ColumnId::Status,
    ColumnId::People,
    ColumnId::Notes,
    ColumnId::Runtime,
];

/// Decides whether `actor` may edit `column` on `task`.
///
/// Pure and side-effect free; callers must re-evaluate on every request
/// because the task's stage, its project manager, and the actor identity
/// all change independently.
#[must_use]
pub fn can_edit(column: ColumnId, task: &Task, actor: &ActorContext) -> bool {
    match actor.tier() {
        MembershipTier::Guest => false,
        MembershipTier::Admin | MembershipTier::God => true,
        MembershipTier::TeamMember => {
            if task.is_pre_kickoff() {
                return true;
            }
            if actor.is_project_manager_of(task) {
                return true;
            }
            POST_KICKOFF_EDITABLE.contains(&column)
        }
    }
}
