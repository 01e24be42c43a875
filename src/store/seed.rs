use chrono::NaiveDate;

use crate::domain::{
    Crop, CropStatus, Expense, ExpenseCategory, Farm, Task, TaskPriority, WeatherReport,
};
use crate::utils::dates::add_days;

use super::RecordStore;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl RecordStore {
    /// Demo data for a fresh session: one farm with two crops, three tasks
    /// scheduled around `today` and three spring expenses.
    pub fn seeded(today: NaiveDate) -> Self {
        let mut store = Self::new();

        let mut farm = Farm::new("1", "North Field Farm", "Valley Ridge", 150.0);
        farm.crop_count = 3;
        farm.task_count = 5;
        store.replace_farms(vec![farm]);

        store.replace_crops(vec![
            Crop {
                id: "1".into(),
                farm_id: "1".into(),
                name: "Corn".into(),
                variety: "Sweet Corn".into(),
                planted_date: ymd(2024, 3, 15),
                expected_harvest_date: ymd(2024, 8, 15),
                status: CropStatus::Growing,
                area: 50.0,
            },
            Crop {
                id: "2".into(),
                farm_id: "1".into(),
                name: "Tomatoes".into(),
                variety: "Beefsteak".into(),
                planted_date: ymd(2024, 4, 1),
                expected_harvest_date: ymd(2024, 7, 15),
                status: CropStatus::Flowering,
                area: 25.0,
            },
        ]);

        store.replace_tasks(vec![
            Task {
                id: "1".into(),
                farm_id: "1".into(),
                crop_id: Some("1".into()),
                title: "Water Corn Field".into(),
                description: "Deep watering needed".into(),
                scheduled_date: today,
                completed: false,
                priority: TaskPriority::High,
            },
            Task {
                id: "2".into(),
                farm_id: "1".into(),
                crop_id: Some("2".into()),
                title: "Harvest Tomatoes".into(),
                description: "Pick ripe tomatoes".into(),
                scheduled_date: add_days(today, 1),
                completed: false,
                priority: TaskPriority::Medium,
            },
            Task {
                id: "3".into(),
                farm_id: "1".into(),
                crop_id: Some("1".into()),
                title: "Apply Fertilizer".into(),
                description: "Nitrogen fertilizer application".into(),
                scheduled_date: add_days(today, 3),
                completed: true,
                priority: TaskPriority::Low,
            },
        ]);

        store.replace_expenses(vec![
            Expense {
                id: "1".into(),
                farm_id: "1".into(),
                amount: 450.0,
                category: ExpenseCategory::Seeds,
                description: "Corn seeds for spring planting".into(),
                date: ymd(2024, 3, 10),
            },
            Expense {
                id: "2".into(),
                farm_id: "1".into(),
                amount: 120.0,
                category: ExpenseCategory::Fertilizer,
                description: "Organic fertilizer".into(),
                date: ymd(2024, 3, 20),
            },
            Expense {
                id: "3".into(),
                farm_id: "1".into(),
                amount: 75.0,
                category: ExpenseCategory::Tools,
                description: "New garden hose".into(),
                date: ymd(2024, 4, 5),
            },
        ]);

        store.replace_weather(Some(WeatherReport::sample()));
        store
    }
}
