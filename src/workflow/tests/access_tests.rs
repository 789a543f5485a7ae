//! Tests for column-level edit authorization.

use crate::phase::{Fase, Phase, RoleField};
use crate::workflow::{
    domain::{ActorContext, ColumnId, FieldChange, MembershipTier, PersonId, Task, TaskPatch},
    services::{POST_KICKOFF_EDITABLE, can_edit},
    tests::support::task_on_board,
};
use chrono::Utc;
use rstest::rstest;

const SAMPLE_COLUMNS: [ColumnId; 6] = [
    ColumnId::Status,
    ColumnId::People,
    ColumnId::MiamiDueDate,
    ColumnId::IsPrivate,
    ColumnId::Client,
    ColumnId::Role(RoleField::Traductor),
];

fn task_in_fase(fase: Option<Fase>) -> Task {
    let mut task = task_on_board("Bogota-Translation");
    let patch = TaskPatch {
        fase: match fase {
            Some(value) => FieldChange::Set(value),
            None => FieldChange::Clear,
        },
        ..TaskPatch::default()
    };
    task.apply_patch(&patch, Utc::now());
    task
}

fn task_with_pm(fase: Option<Fase>, pm: PersonId) -> Task {
    let mut task = task_in_fase(fase);
    let mut patch = TaskPatch::default();
    patch.roles.set(RoleField::ProjectManager, FieldChange::Set(pm));
    task.apply_patch(&patch, Utc::now());
    task
}

#[test]
fn guests_can_never_edit() {
    let task = task_in_fase(None);
    let guest = ActorContext::new(PersonId::new(), MembershipTier::Guest);
    for column in SAMPLE_COLUMNS {
        assert!(!can_edit(column, &task, &guest));
    }
}

#[rstest]
#[case(MembershipTier::Admin)]
#[case(MembershipTier::God)]
fn elevated_tiers_edit_every_column(#[case] tier: MembershipTier) {
    let task = task_in_fase(Some(Fase::InPhase(Phase::Mix)));
    let actor = ActorContext::new(PersonId::new(), tier);
    for column in SAMPLE_COLUMNS {
        assert!(can_edit(column, &task, &actor));
    }
}

#[rstest]
#[case(None)]
#[case(Some(Fase::OnHold))]
#[case(Some(Fase::InPhase(Phase::Kickoff)))]
fn team_members_edit_everything_before_kickoff_completes(#[case] fase: Option<Fase>) {
    let task = task_in_fase(fase);
    let actor = ActorContext::new(PersonId::new(), MembershipTier::TeamMember);
    for column in SAMPLE_COLUMNS {
        assert!(can_edit(column, &task, &actor));
    }
}

#[test]
fn post_kickoff_team_members_are_limited_to_the_allow_list() {
    let task = task_in_fase(Some(Fase::InPhase(Phase::Translation)));
    let actor = ActorContext::new(PersonId::new(), MembershipTier::TeamMember);

    for column in POST_KICKOFF_EDITABLE {
        assert!(can_edit(column, &task, &actor));
    }
    assert!(!can_edit(ColumnId::MiamiDueDate, &task, &actor));
    assert!(!can_edit(ColumnId::IsPrivate, &task, &actor));
    assert!(!can_edit(ColumnId::Role(RoleField::Traductor), &task, &actor));
}

#[test]
fn the_assigned_project_manager_keeps_full_edit_rights() {
    let pm = PersonId::new();
    let task = task_with_pm(Some(Fase::InPhase(Phase::Translation)), pm);
    let actor = ActorContext::new(pm, MembershipTier::TeamMember);
    for column in SAMPLE_COLUMNS {
        assert!(can_edit(column, &task, &actor));
    }
}

#[test]
fn a_different_project_manager_gets_no_special_rights() {
    let task = task_with_pm(Some(Fase::InPhase(Phase::Translation)), PersonId::new());
    let actor = ActorContext::new(PersonId::new(), MembershipTier::TeamMember);
    assert!(!can_edit(ColumnId::ClientDueDate, &task, &actor));
}
