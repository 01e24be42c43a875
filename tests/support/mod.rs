#![allow(dead_code)]

use chrono::NaiveDate;
use crop_keeper::{
    domain::{Crop, CropStatus, Expense, ExpenseCategory, Farm, RecordId},
    notify::NotificationLog,
    services::{EntryPolicy, HandlerContext},
    store::RecordStore,
    utils::dates::FixedClock,
};

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn today() -> NaiveDate {
    ymd(2024, 5, 20)
}

pub fn farm_one() -> RecordId {
    RecordId::from("1")
}

/// Owns the collaborators a handler borrows so each test can build a
/// fresh `HandlerContext` and inspect the notifications afterwards.
pub struct Harness {
    pub clock: FixedClock,
    pub log: NotificationLog,
    pub policy: EntryPolicy,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(EntryPolicy::default())
    }

    pub fn with_policy(policy: EntryPolicy) -> Self {
        Self {
            clock: FixedClock(today()),
            log: NotificationLog::new(),
            policy,
        }
    }

    pub fn ctx(&mut self) -> HandlerContext<'_> {
        HandlerContext::new(&self.clock, &mut self.log, &self.policy)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.log
            .entries()
            .iter()
            .map(|entry| entry.message.as_str())
            .collect()
    }
}

/// Two farms with a handful of expenses each, for aggregation checks.
pub fn two_farm_store() -> RecordStore {
    let mut store = RecordStore::new();
    store.replace_farms(vec![
        Farm::new("1", "North Field Farm", "Valley Ridge", 150.0),
        Farm::new("2", "River Bend", "Lowlands", 80.0),
    ]);
    store.replace_crops(vec![Crop {
        id: "10".into(),
        farm_id: "2".into(),
        name: "Barley".into(),
        variety: "Spring".into(),
        planted_date: ymd(2024, 3, 1),
        expected_harvest_date: ymd(2024, 7, 1),
        status: CropStatus::Growing,
        area: 12.5,
    }]);
    let expense = |id: &str, farm: &str, amount: f64, category: ExpenseCategory, date: NaiveDate| Expense {
        id: id.into(),
        farm_id: farm.into(),
        amount,
        category,
        description: String::new(),
        date,
    };
    store.replace_expenses(vec![
        expense("20", "1", 100.0, ExpenseCategory::Labor, ymd(2024, 4, 2)),
        expense("21", "1", 40.0, ExpenseCategory::Seeds, ymd(2024, 2, 11)),
        expense("22", "2", 900.0, ExpenseCategory::Equipment, ymd(2024, 4, 3)),
        expense("23", "1", 60.0, ExpenseCategory::Labor, ymd(2024, 2, 28)),
        expense("24", "1", 15.5, ExpenseCategory::Other, ymd(2023, 12, 31)),
    ]);
    store
}
