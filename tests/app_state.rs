mod support;

use crop_keeper::{
    app::{Action, AppState},
    domain::{EntityKind, RecordId, View},
    services::{FormFields, ServiceError},
    store::RecordStore,
};
use support::{today, two_farm_store, Harness};

fn seeded() -> AppState {
    AppState::new(RecordStore::seeded(today())).unwrap()
}

#[test]
fn starts_on_the_first_farm_and_dashboard() {
    let state = seeded();
    assert_eq!(state.selected_farm.as_str(), "1");
    assert_eq!(state.active_view, View::Dashboard);
    assert!(!state.dark_mode);
}

#[test]
fn records_land_on_the_selected_farm() {
    let state = AppState::new(two_farm_store()).unwrap();
    let mut harness = Harness::new();

    let state = state
        .apply(Action::SelectFarm(RecordId::from("2")), &mut harness.ctx())
        .unwrap();
    let state = state
        .apply(
            Action::AddCrop(FormFields::new().with("name", "Oats")),
            &mut harness.ctx(),
        )
        .unwrap();

    let oats = state
        .store
        .crops()
        .iter()
        .find(|crop| crop.name == "Oats")
        .unwrap();
    assert_eq!(oats.farm_id.as_str(), "2");
}

#[test]
fn selecting_an_unknown_farm_is_refused() {
    let state = seeded();
    let mut harness = Harness::new();
    let err = state
        .apply(Action::SelectFarm(RecordId::from("5")), &mut harness.ctx())
        .unwrap_err();
    assert!(matches!(err, ServiceError::UnknownFarm(_)));
    assert_eq!(state.selected_farm.as_str(), "1");
}

#[test]
fn actions_do_not_touch_the_previous_state() {
    let state = seeded();
    let mut harness = Harness::new();

    let next = state
        .apply(
            Action::Delete {
                kind: EntityKind::Task,
                id: RecordId::from("1"),
            },
            &mut harness.ctx(),
        )
        .unwrap();

    assert_eq!(state.store.tasks().len(), 3);
    assert_eq!(next.store.tasks().len(), 2);
}

#[test]
fn toggle_task_and_theme_round_trip() {
    let state = seeded();
    let mut harness = Harness::new();
    let id = RecordId::from("3");

    let once = state
        .apply(Action::ToggleTask(id.clone()), &mut harness.ctx())
        .unwrap();
    let twice = once
        .apply(Action::ToggleTask(id), &mut harness.ctx())
        .unwrap();
    assert_eq!(twice.store.tasks(), state.store.tasks());

    let dark = twice
        .apply(Action::ToggleDarkMode, &mut harness.ctx())
        .unwrap();
    assert!(dark.dark_mode);
    let light = dark
        .apply(Action::SetDarkMode(false), &mut harness.ctx())
        .unwrap();
    assert!(!light.dark_mode);
}

#[test]
fn state_serializes_for_inspection() {
    let state = seeded();
    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains("North Field Farm"));
    let back: AppState = serde_json::from_str(&json).unwrap();
    assert_eq!(back.store.expenses(), state.store.expenses());
}
