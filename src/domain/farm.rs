use serde::{Deserialize, Serialize};

use super::common::{Identifiable, RecordId};

/// Root scoping entity. `crop_count` and `task_count` are the figures the
/// farm was registered with; live counts come from the summary views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    /// Acres.
    pub size: f64,
    pub crop_count: u32,
    pub task_count: u32,
}

impl Farm {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        location: impl Into<String>,
        size: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            size,
            crop_count: 0,
            task_count: 0,
        }
    }
}

impl Identifiable for Farm {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

