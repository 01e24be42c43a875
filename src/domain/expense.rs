use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{labelled_enum, FarmScoped, Identifiable, RecordId};

/// Fixed set of spending categories. A closed enum keeps a typo from
/// opening a new bucket in the category and monthly views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseCategory {
    Seeds,
    Fertilizer,
    Tools,
    Equipment,
    Labor,
    Utilities,
    Other,
}

labelled_enum!(ExpenseCategory, "expense category", {
    Seeds => "Seeds",
    Fertilizer => "Fertilizer",
    Tools => "Tools",
    Equipment => "Equipment",
    Labor => "Labor",
    Utilities => "Utilities",
    Other => "Other",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: RecordId,
    pub farm_id: RecordId,
    /// Never negative.
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
}

impl Identifiable for Expense {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl FarmScoped for Expense {
    fn farm_id(&self) -> &RecordId {
        &self.farm_id
    }
}
