use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{labelled_enum, FarmScoped, Identifiable, RecordId};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

labelled_enum!(TaskPriority, "task priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: RecordId,
    pub farm_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub completed: bool,
    pub priority: TaskPriority,
}

impl Task {
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.scheduled_date == day
    }
}

impl Identifiable for Task {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl FarmScoped for Task {
    fn farm_id(&self) -> &RecordId {
        &self.farm_id
    }
}
