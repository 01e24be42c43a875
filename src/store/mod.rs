//! In-memory record collections.
//!
//! The store only offers whole-collection reads and writes. Handlers copy a
//! collection, change the copy and hand it back with one of the `replace_*`
//! methods.

mod seed;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Crop, Expense, Farm, FarmScoped, Identifiable, RecordId, Task, WeatherReport};

/// How new record ids are minted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Monotonic counter shared by every collection.
    #[default]
    Sequential,
    /// Random v4 UUIDs.
    Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    farms: Vec<Farm>,
    crops: Vec<Crop>,
    tasks: Vec<Task>,
    expenses: Vec<Expense>,
    weather: Option<WeatherReport>,
    next_sequence: u64,
    /// Set once the counter has passed `u64::MAX`; later sequential requests
    /// get UUIDs instead.
    #[serde(default)]
    sequence_exhausted: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            next_sequence: 1,
            ..Self::default()
        }
    }

    pub fn farms(&self) -> &[Farm] {
        &self.farms
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn weather(&self) -> Option<&WeatherReport> {
        self.weather.as_ref()
    }

    pub fn replace_farms(&mut self, farms: Vec<Farm>) {
        self.reserve_ids(&farms);
        self.farms = farms;
    }

    pub fn replace_crops(&mut self, crops: Vec<Crop>) {
        self.reserve_ids(&crops);
        self.crops = crops;
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.reserve_ids(&tasks);
        self.tasks = tasks;
    }

    pub fn replace_expenses(&mut self, expenses: Vec<Expense>) {
        self.reserve_ids(&expenses);
        self.expenses = expenses;
    }

    pub fn replace_weather(&mut self, weather: Option<WeatherReport>) {
        self.weather = weather;
    }

    pub fn farm(&self, id: &RecordId) -> Option<&Farm> {
        find_by_id(&self.farms, id)
    }

    pub fn crop(&self, id: &RecordId) -> Option<&Crop> {
        find_by_id(&self.crops, id)
    }

    pub fn task(&self, id: &RecordId) -> Option<&Task> {
        find_by_id(&self.tasks, id)
    }

    pub fn expense(&self, id: &RecordId) -> Option<&Expense> {
        find_by_id(&self.expenses, id)
    }

    /// Hands out the next record id. Sequential ids are never reused, even
    /// after the record that held one is deleted. Once the counter runs out
    /// the store falls back to UUIDs.
    pub fn allocate_id(&mut self, strategy: IdStrategy) -> RecordId {
        match strategy {
            IdStrategy::Sequential if !self.sequence_exhausted => {
                let id = self.next_sequence.max(1);
                match id.checked_add(1) {
                    Some(next) => self.next_sequence = next,
                    None => self.sequence_exhausted = true,
                }
                RecordId::new(id.to_string())
            }
            IdStrategy::Sequential => {
                warn!("sequential ids exhausted; allocating a UUID");
                RecordId::new(Uuid::new_v4().to_string())
            }
            IdStrategy::Uuid => RecordId::new(Uuid::new_v4().to_string()),
        }
    }

    /// Keeps the counter ahead of every numeric id that enters the store.
    fn reserve_ids<T: Identifiable>(&mut self, records: &[T]) {
        if let Some(highest) = records
            .iter()
            .filter_map(|record| record.id().sequence())
            .max()
        {
            match highest.checked_add(1) {
                Some(next) => self.next_sequence = self.next_sequence.max(next),
                None => self.sequence_exhausted = true,
            }
        }
    }
}

/// Records of `collection` that belong to `farm_id`, in insertion order.
pub fn list_by_farm<'a, T: FarmScoped>(collection: &'a [T], farm_id: &RecordId) -> Vec<&'a T> {
    collection
        .iter()
        .filter(|record| record.farm_id() == farm_id)
        .collect()
}

fn find_by_id<'a, T: Identifiable>(collection: &'a [T], id: &RecordId) -> Option<&'a T> {
    collection.iter().find(|record| record.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, TaskPriority};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn task(id: &str, farm: &str) -> Task {
        Task {
            id: id.into(),
            farm_id: farm.into(),
            crop_id: None,
            title: format!("task {id}"),
            description: String::new(),
            scheduled_date: day(),
            completed: false,
            priority: TaskPriority::Medium,
        }
    }

    #[test]
    fn list_by_farm_preserves_insertion_order() {
        let tasks = vec![task("1", "a"), task("2", "b"), task("3", "a"), task("4", "a")];
        let ids: Vec<&str> = list_by_farm(&tasks, &"a".into())
            .into_iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "3", "4"]);
        assert!(list_by_farm(&tasks, &"zzz".into()).is_empty());
    }

    #[test]
    fn allocation_skips_ids_already_present() {
        let mut store = RecordStore::new();
        store.replace_tasks(vec![task("7", "a"), task("abc", "a")]);
        assert_eq!(store.allocate_id(IdStrategy::Sequential).as_str(), "8");
        assert_eq!(store.allocate_id(IdStrategy::Sequential).as_str(), "9");
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = RecordStore::new();
        let first = store.allocate_id(IdStrategy::Sequential);
        store.replace_expenses(vec![Expense {
            id: first.clone(),
            farm_id: "a".into(),
            amount: 10.0,
            category: ExpenseCategory::Tools,
            description: String::new(),
            date: day(),
        }]);
        store.replace_expenses(Vec::new());
        let second = store.allocate_id(IdStrategy::Sequential);
        assert_ne!(first, second);
    }

    #[test]
    fn largest_numeric_id_switches_allocation_to_uuids() {
        let mut store = RecordStore::new();
        store.replace_farms(vec![Farm::new("18446744073709551615", "Edge", "Nowhere", 1.0)]);

        let id = store.allocate_id(IdStrategy::Sequential);
        assert!(id.sequence().is_none());
        assert!(store.farm(&id).is_none());
        assert_ne!(store.allocate_id(IdStrategy::Sequential), id);
    }

    #[test]
    fn counter_hands_out_the_last_value_once() {
        let mut store = RecordStore::new();
        store.replace_tasks(vec![task("18446744073709551614", "a")]);

        assert_eq!(
            store.allocate_id(IdStrategy::Sequential).sequence(),
            Some(u64::MAX)
        );
        let next = store.allocate_id(IdStrategy::Sequential);
        assert!(next.sequence().is_none());
    }

    #[test]
    fn uuid_strategy_produces_distinct_ids() {
        let mut store = RecordStore::new();
        let a = store.allocate_id(IdStrategy::Uuid);
        let b = store.allocate_id(IdStrategy::Uuid);
        assert_ne!(a, b);
        assert!(a.sequence().is_none());
    }
}
