//! Farm records and the closed enumerations that classify them.

pub mod common;
pub mod crop;
pub mod expense;
pub mod farm;
pub mod task;
pub mod view;
pub mod weather;

pub use common::{FarmScoped, Identifiable, ParseEnumError, RecordId};
pub use crop::{Crop, CropStatus};
pub use expense::{Expense, ExpenseCategory};
pub use farm::Farm;
pub use task::{Task, TaskPriority};
pub use view::View;
pub use weather::{Advisory, DailyForecast, WeatherCondition, WeatherReport};

use serde::{Deserialize, Serialize};

use common::labelled_enum;

/// The record collections a delete can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Crop,
    Task,
    Expense,
}

labelled_enum!(EntityKind, "record kind", {
    Crop => "Crop",
    Task => "Task",
    Expense => "Expense",
});
