//! Tests for the single-task update pipeline.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::phase::{Phase, RoleField};
use crate::workflow::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        ActorContext, AuditKind, FieldChange, MembershipTier, Person, PersonId, Task,
        TaskChanges, TaskPatch, TaskStatus,
    },
    ports::CacheScope,
    services::{PrivacyAutomation, TaskMutationCoordinator, UpdateOutcome},
    tests::support::{
        FailingUpdateStore, FixedClock, RecordingCache, RecordingNotifier, StaticDirectory,
        StubAdvancer, a_tuesday, task_on_board,
    },
};

type TestCoordinator = TaskMutationCoordinator<
    InMemoryTaskStore,
    StubAdvancer,
    StaticDirectory,
    RecordingNotifier,
    RecordingCache,
    FixedClock,
>;

struct Harness {
    store: Arc<InMemoryTaskStore>,
    advancer: Arc<StubAdvancer>,
    cache: Arc<RecordingCache>,
    coordinator: TestCoordinator,
}

fn harness(guests: Vec<PersonId>, advancer: StubAdvancer) -> Harness {
    let store = Arc::new(InMemoryTaskStore::new());
    let advancer = Arc::new(advancer);
    let cache = Arc::new(RecordingCache::new());
    let clock = Arc::new(FixedClock::at_noon(a_tuesday()));
    let privacy = PrivacyAutomation::new(
        Arc::clone(&store),
        Arc::new(StaticDirectory::with_guests(guests)),
        Arc::new(RecordingNotifier::new()),
        Arc::clone(&clock),
    );
    let coordinator = TaskMutationCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&advancer),
        privacy,
        Arc::clone(&cache),
        clock,
    );
    Harness {
        store,
        advancer,
        cache,
        coordinator,
    }
}

fn team_member() -> ActorContext {
    ActorContext::new(PersonId::new(), MembershipTier::TeamMember)
}

fn admin() -> ActorContext {
    ActorContext::new(PersonId::new(), MembershipTier::Admin)
}

fn seeded_task(store: &InMemoryTaskStore, patch: TaskPatch) -> Task {
    let mut task = task_on_board("Bogota-Translation");
    task.apply_patch(&patch, Utc::now());
    store.insert_task(task.clone());
    task
}

fn status_change(status: TaskStatus) -> TaskChanges {
    TaskChanges {
        status: Some(status),
        ..TaskChanges::default()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[tokio::test(flavor = "multi_thread")]
async fn leaving_done_is_rejected_for_team_members() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        },
    );

    let outcome = harness
        .coordinator
        .apply_update(&task, status_change(TaskStatus::Working), &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::RejectedStatusLock));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.status(), TaskStatus::Done);
}

#[tokio::test(flavor = "multi_thread")]
async fn admins_may_reopen_a_done_task() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        },
    );

    let outcome = harness
        .coordinator
        .apply_update(&task, status_change(TaskStatus::Working), &admin())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.status(), TaskStatus::Working);
}

#[tokio::test(flavor = "multi_thread")]
async fn moving_to_working_stamps_the_start_time_once() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(&harness.store, TaskPatch::default());

    harness
        .coordinator
        .apply_update(&task, status_change(TaskStatus::Working), &team_member())
        .await;

    let stored = harness.store.task(task.id()).expect("task stored");
    let first_start = stored.started_at().expect("start time stamped");

    harness
        .coordinator
        .apply_update(&stored, status_change(TaskStatus::Stuck), &team_member())
        .await;
    harness
        .coordinator
        .apply_update(
            &harness.store.task(task.id()).expect("task stored"),
            status_change(TaskStatus::Working),
            &team_member(),
        )
        .await;

    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.started_at(), Some(first_start));
}

#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_stamps_dates_and_advances_its_phase() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(&harness.store, TaskPatch::default());

    let outcome = harness
        .coordinator
        .apply_update(&task, status_change(TaskStatus::Done), &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.status(), TaskStatus::Done);
    assert!(stored.completed_at().is_some());
    assert_eq!(stored.date_delivered(), Some(a_tuesday()));
    assert_eq!(harness.advancer.calls(), vec![task.id()]);
    // Both the departed and the destination board views went stale.
    assert_eq!(
        harness.cache.invalidations(),
        vec![
            CacheScope::Board("Bogota-Translation".to_owned()),
            CacheScope::Board("Bogota-Adapting".to_owned()),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn a_failed_advance_is_a_partial_success() {
    let task = task_on_board("Bogota-Translation");
    let harness = harness(
        vec![],
        StubAdvancer::advancing_to(Phase::Adapting).rejecting([task.id()]),
    );
    harness.store.insert_task(task.clone());

    let outcome = harness
        .coordinator
        .apply_update(&task, status_change(TaskStatus::Done), &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::PhaseAdvanceFailed(_)));
    // The status write stands even though advancement failed.
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.status(), TaskStatus::Done);
    assert!(harness.cache.invalidations().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn miami_date_after_client_date_is_rejected() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            client_due_date: FieldChange::Set(date(2026, 9, 10)),
            ..TaskPatch::default()
        },
    );
    let changes = TaskChanges {
        miami_due_date: FieldChange::Set(date(2026, 9, 15)),
        ..TaskChanges::default()
    };

    let outcome = harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::RejectedValidation(_)));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.miami_due_date(), None);
    assert_eq!(stored.client_due_date(), Some(date(2026, 9, 10)));
}

#[tokio::test(flavor = "multi_thread")]
async fn client_date_before_existing_miami_date_is_rejected() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            miami_due_date: FieldChange::Set(date(2026, 9, 15)),
            ..TaskPatch::default()
        },
    );
    let changes = TaskChanges {
        client_due_date: FieldChange::Set(date(2026, 9, 10)),
        ..TaskChanges::default()
    };

    let outcome = harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::RejectedValidation(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_client_date_lifts_the_constraint() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            client_due_date: FieldChange::Set(date(2026, 9, 10)),
            ..TaskPatch::default()
        },
    );
    let changes = TaskChanges {
        miami_due_date: FieldChange::Set(date(2026, 9, 15)),
        client_due_date: FieldChange::Clear,
        ..TaskChanges::default()
    };

    let outcome = harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
}

#[tokio::test(flavor = "multi_thread")]
async fn assigning_a_guest_role_on_a_private_task_exposes_them() {
    let guest = Person::new(PersonId::new(), "Valentina");
    let harness = harness(vec![guest.id()], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            is_private: Some(true),
            ..TaskPatch::default()
        },
    );
    let mut changes = TaskChanges::default();
    changes
        .roles
        .set(RoleField::Traductor, FieldChange::Set(guest.clone()));

    let outcome = harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    assert_eq!(harness.store.viewers(task.id()), vec![guest.id()]);
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.roles().get(RoleField::Traductor), Some(guest.id()));
    assert!(stored.guest_due_date().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn making_private_and_assigning_in_one_edit_triggers_exposure() {
    let guest = Person::new(PersonId::new(), "Valentina");
    let harness = harness(vec![guest.id()], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(&harness.store, TaskPatch::default());
    let mut changes = TaskChanges {
        is_private: Some(true),
        ..TaskChanges::default()
    };
    changes
        .roles
        .set(RoleField::Traductor, FieldChange::Set(guest.clone()));

    harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert_eq!(harness.store.viewers(task.id()), vec![guest.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn turning_privacy_off_clears_viewers_and_guest_role_bindings() {
    let guest = Person::new(PersonId::new(), "Valentina");
    let harness = harness(vec![guest.id()], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(
        &harness.store,
        TaskPatch {
            is_private: Some(true),
            ..TaskPatch::default()
        },
    );
    let mut assign = TaskChanges::default();
    assign
        .roles
        .set(RoleField::Traductor, FieldChange::Set(guest.clone()));
    harness
        .coordinator
        .apply_update(&task, assign, &team_member())
        .await;
    assert_eq!(harness.store.viewers(task.id()), vec![guest.id()]);

    let exposed = harness.store.task(task.id()).expect("task stored");
    let changes = TaskChanges {
        is_private: Some(false),
        ..TaskChanges::default()
    };
    let outcome = harness
        .coordinator
        .apply_update(&exposed, changes, &admin())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert!(!stored.is_private());
    assert!(harness.store.viewers(task.id()).is_empty());
    assert_eq!(stored.roles().get(RoleField::Traductor), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn a_store_failure_surfaces_as_persist_failed() {
    let store = Arc::new(FailingUpdateStore::new());
    let advancer = Arc::new(StubAdvancer::advancing_to(Phase::Adapting));
    let cache = Arc::new(RecordingCache::new());
    let clock = Arc::new(FixedClock::at_noon(a_tuesday()));
    let privacy = PrivacyAutomation::new(
        Arc::clone(&store),
        Arc::new(StaticDirectory::default()),
        Arc::new(RecordingNotifier::new()),
        Arc::clone(&clock),
    );
    let coordinator = TaskMutationCoordinator::new(
        Arc::clone(&store),
        Arc::clone(&advancer),
        privacy,
        Arc::clone(&cache),
        clock,
    );
    let task = task_on_board("Bogota-Translation");

    let outcome = coordinator
        .apply_update(&task, status_change(TaskStatus::Done), &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::PersistFailed(_)));
    assert!(advancer.calls().is_empty());
    assert!(cache.invalidations().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn replacing_the_people_list_audits_the_change() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let keep = Person::new(PersonId::new(), "Sofia");
    let added = Person::new(PersonId::new(), "Andres");
    let mut task = task_on_board("Bogota-Translation");
    task.replace_people(vec![keep.id()], Utc::now());
    harness.store.insert_task(task.clone());

    let changes = TaskChanges {
        people: Some(vec![keep.clone(), added.clone()]),
        ..TaskChanges::default()
    };
    let outcome = harness
        .coordinator
        .apply_update(&task, changes, &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    let stored = harness.store.task(task.id()).expect("task stored");
    assert_eq!(stored.people(), &[keep.id(), added.id()]);
    let audits = harness.store.audit_records();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].kind(), AuditKind::PeopleAdded);
    assert_eq!(audits[0].task_id(), task.id());
}

#[tokio::test(flavor = "multi_thread")]
async fn an_untouched_edit_applies_without_side_effects() {
    let harness = harness(vec![], StubAdvancer::advancing_to(Phase::Adapting));
    let task = seeded_task(&harness.store, TaskPatch::default());

    let outcome = harness
        .coordinator
        .apply_update(&task, TaskChanges::default(), &team_member())
        .await;

    assert!(matches!(outcome, UpdateOutcome::Applied));
    assert!(harness.store.audit_records().is_empty());
    assert!(harness.advancer.calls().is_empty());
    assert!(harness.cache.invalidations().is_empty());
}
