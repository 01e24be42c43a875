use serde::{Deserialize, Serialize};

use super::common::labelled_enum;

/// Dashboard tabs. Any view can be selected from any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Crops,
    Tasks,
    Expenses,
    Weather,
    Analytics,
}

labelled_enum!(View, "view", {
    Dashboard => "dashboard",
    Crops => "crops",
    Tasks => "tasks",
    Expenses => "expenses",
    Weather => "weather",
    Analytics => "analytics",
});

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Crops => "Crop Management",
            View::Tasks => "Task Management",
            View::Expenses => "Expense Tracking",
            View::Weather => "Weather Monitoring",
            View::Analytics => "Analytics",
        }
    }
}
