mod support;

use crop_keeper::{
    domain::{CropStatus, EntityKind, ExpenseCategory, Identifiable, RecordId, TaskPriority},
    notify::Severity,
    services::{
        CropService, EntryPolicy, ExpenseService, FormFields, NumericInput, RecordService,
        ReferenceChecks, ServiceError, TaskService,
    },
    store::{IdStrategy, RecordStore},
};
use support::{farm_one, today, ymd, Harness};

#[test]
fn add_crop_fills_defaults_for_the_selected_farm() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let form = FormFields::new().with("name", "Corn").with("area", "50");

    let id = CropService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap();

    assert_eq!(store.crops().len(), 3);
    let crop = store.crop(&id).unwrap();
    assert_eq!(crop.farm_id, farm_one());
    assert_eq!(crop.status, CropStatus::Planted);
    assert_eq!(crop.area, 50.0);
    assert_eq!(crop.planted_date, today());
    assert_eq!(crop.expected_harvest_date, ymd(2024, 8, 18));
    assert_eq!(harness.messages(), vec!["Corn crop added successfully!"]);
    assert_eq!(harness.log.last().unwrap().severity, Severity::Success);
}

#[test]
fn add_task_starts_open_with_medium_priority() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let form = FormFields::new()
        .with("title", "Check irrigation lines")
        .with("scheduled_date", "2024-05-22");

    let id = TaskService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap();

    let task = store.task(&id).unwrap();
    assert!(!task.completed);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.scheduled_date, ymd(2024, 5, 22));
    assert_eq!(task.crop_id, None);
    assert_eq!(
        harness.messages(),
        vec!["Task \"Check irrigation lines\" added successfully!"]
    );
}

#[test]
fn unusable_expense_amount_is_recorded_as_zero() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let form = FormFields::new()
        .with("amount", "bad")
        .with("category", "Seeds");

    let id = ExpenseService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap();

    let expense = store.expense(&id).unwrap();
    assert_eq!(expense.amount, 0.0);
    assert_eq!(expense.category, ExpenseCategory::Seeds);
    assert_eq!(expense.date, today());
    let severities: Vec<Severity> = harness.log.entries().iter().map(|n| n.severity).collect();
    assert_eq!(severities, vec![Severity::Warning, Severity::Success]);
    assert_eq!(
        harness.log.last().unwrap().message,
        "Expense of $0 added successfully!"
    );
}

#[test]
fn reject_policy_refuses_bad_numbers_without_writing() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::with_policy(EntryPolicy {
        numeric_input: NumericInput::Reject,
        ..EntryPolicy::default()
    });
    let form = FormFields::new()
        .with("amount", "-12")
        .with("category", "Tools");

    let err = ExpenseService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap_err();

    assert!(matches!(err, ServiceError::InvalidField { field: "amount", .. }));
    assert_eq!(store.expenses().len(), 3);
    assert!(harness.log.entries().is_empty());
}

#[test]
fn missing_required_fields_are_reported() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let blank = FormFields::new().with("name", "   ");

    let err = CropService::add(&mut store, &blank, &farm_one(), &mut harness.ctx()).unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("name")));

    let err = ExpenseService::add(
        &mut store,
        &FormFields::new().with("amount", "10"),
        &farm_one(),
        &mut harness.ctx(),
    )
    .unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("category")));
    assert_eq!(store.crops().len(), 2);
}

#[test]
fn writes_to_an_unknown_farm_fail() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let form = FormFields::new().with("title", "Mend fence");

    let err = TaskService::add(&mut store, &form, &RecordId::from("9"), &mut harness.ctx())
        .unwrap_err();

    assert!(matches!(err, ServiceError::UnknownFarm(id) if id.as_str() == "9"));
    assert_eq!(store.tasks().len(), 3);
}

#[test]
fn crop_reference_checks_follow_policy() {
    let form = FormFields::new()
        .with("title", "Stake vines")
        .with("crop_id", "42");

    let mut store = RecordStore::seeded(today());
    let mut advisory = Harness::new();
    let id = TaskService::add(&mut store, &form, &farm_one(), &mut advisory.ctx()).unwrap();
    assert_eq!(store.task(&id).unwrap().crop_id, Some(RecordId::from("42")));

    let mut store = RecordStore::seeded(today());
    let mut strict = Harness::with_policy(EntryPolicy {
        reference_checks: ReferenceChecks::Strict,
        ..EntryPolicy::default()
    });
    let err = TaskService::add(&mut store, &form, &farm_one(), &mut strict.ctx()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::UnknownReference {
            kind: EntityKind::Crop,
            ..
        }
    ));
}

#[test]
fn toggling_twice_restores_the_task() {
    let mut store = RecordStore::seeded(today());
    let before = store.tasks().to_vec();
    let mut harness = Harness::new();
    let id = RecordId::from("2");

    assert!(TaskService::toggle_complete(&mut store, &id, &mut harness.ctx()));
    assert!(store.task(&id).unwrap().completed);
    assert!(TaskService::toggle_complete(&mut store, &id, &mut harness.ctx()));

    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(
        harness.messages(),
        vec!["Task status updated!", "Task status updated!"]
    );
}

#[test]
fn toggling_an_unknown_task_changes_nothing() {
    let mut store = RecordStore::seeded(today());
    let before = store.tasks().to_vec();
    let mut harness = Harness::new();

    assert!(!TaskService::toggle_complete(
        &mut store,
        &RecordId::from("77"),
        &mut harness.ctx()
    ));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn delete_removes_exactly_one_record() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();

    assert!(RecordService::delete(
        &mut store,
        EntityKind::Expense,
        &RecordId::from("2"),
        &mut harness.ctx()
    ));
    let remaining: Vec<&str> = store.expenses().iter().map(|e| e.id().as_str()).collect();
    assert_eq!(remaining, vec!["1", "3"]);
    assert_eq!(harness.messages(), vec!["Expense deleted successfully!"]);
}

#[test]
fn delete_of_an_absent_id_is_a_no_op() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();

    assert!(!RecordService::delete(
        &mut store,
        EntityKind::Crop,
        &RecordId::from("99"),
        &mut harness.ctx()
    ));
    assert_eq!(store.crops().len(), 2);
    assert_eq!(harness.log.last().unwrap().severity, Severity::Info);
}

#[test]
fn ids_stay_unique_across_collections_and_deletes() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::new();
    let crop = CropService::add(
        &mut store,
        &FormFields::new().with("name", "Beans"),
        &farm_one(),
        &mut harness.ctx(),
    )
    .unwrap();
    RecordService::delete(&mut store, EntityKind::Crop, &crop, &mut harness.ctx());
    let task = TaskService::add(
        &mut store,
        &FormFields::new().with("title", "Weed rows"),
        &farm_one(),
        &mut harness.ctx(),
    )
    .unwrap();

    assert_ne!(crop, task);
    assert!(store.crops().iter().all(|c| c.id != task));
    assert!(store.expenses().iter().all(|e| e.id != task));
}

#[test]
fn uuid_ids_are_distinct() {
    let mut store = RecordStore::seeded(today());
    let mut harness = Harness::with_policy(EntryPolicy {
        id_strategy: IdStrategy::Uuid,
        ..EntryPolicy::default()
    });
    let form = FormFields::new().with("amount", "5").with("category", "Labor");
    let first = ExpenseService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap();
    let second = ExpenseService::add(&mut store, &form, &farm_one(), &mut harness.ctx()).unwrap();

    assert_ne!(first, second);
    assert_eq!(first.as_str().len(), 36);
}
