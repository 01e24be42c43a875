use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{labelled_enum, FarmScoped, Identifiable, RecordId};

/// Growth stage recorded for a crop. Set when the crop is entered and never
/// advanced automatically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CropStatus {
    #[default]
    Planted,
    Growing,
    Flowering,
    Harvested,
}

labelled_enum!(CropStatus, "crop status", {
    Planted => "Planted",
    Growing => "Growing",
    Flowering => "Flowering",
    Harvested => "Harvested",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub id: RecordId,
    pub farm_id: RecordId,
    pub name: String,
    pub variety: String,
    pub planted_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub status: CropStatus,
    /// Acres.
    pub area: f64,
}

impl Crop {
    /// Days left until the expected harvest; negative once it has passed.
    pub fn days_to_harvest(&self, today: NaiveDate) -> i64 {
        (self.expected_harvest_date - today).num_days()
    }
}

impl Identifiable for Crop {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl FarmScoped for Crop {
    fn farm_id(&self) -> &RecordId {
        &self.farm_id
    }
}
