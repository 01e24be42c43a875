//! Command handlers and aggregation views over the record store.

pub mod crop_service;
pub mod expense_service;
pub mod form;
pub mod record_service;
pub mod summary_service;
pub mod task_service;

pub use crop_service::CropService;
pub use expense_service::ExpenseService;
pub use form::{fields, FormFields};
pub use record_service::RecordService;
pub use summary_service::{
    CategoryTotals, DashboardSummary, FarmOverview, MonthlyExpenses, SummaryService, TaskStats,
    UpcomingTasks,
};
pub use task_service::TaskService;

use serde::{Deserialize, Serialize};

use crate::domain::{EntityKind, RecordId};
use crate::errors::FarmError;
use crate::notify::{Notification, NotificationSink};
use crate::store::{IdStrategy, RecordStore};
use crate::utils::dates::Clock;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Farm `{0}` not found")]
    UnknownFarm(RecordId),
    #[error("No farms registered")]
    NoFarms,
    #[error("`{0}` is required")]
    MissingField(&'static str),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("{kind} `{id}` not found")]
    UnknownReference { kind: EntityKind, id: RecordId },
    #[error(transparent)]
    Core(#[from] FarmError),
}

/// What to do with a numeric field that does not hold a usable number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumericInput {
    /// Record 0 and raise a warning notification.
    #[default]
    Coerce,
    /// Refuse the submission.
    Reject,
}

/// Whether a task's crop reference must resolve within the task's farm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceChecks {
    /// Dangling references are logged and kept.
    #[default]
    Advisory,
    Strict,
}

/// Defaults and validation switches applied by the command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPolicy {
    pub numeric_input: NumericInput,
    pub reference_checks: ReferenceChecks,
    pub id_strategy: IdStrategy,
    pub harvest_window_days: i64,
    pub currency_symbol: String,
}

impl Default for EntryPolicy {
    fn default() -> Self {
        Self {
            numeric_input: NumericInput::Coerce,
            reference_checks: ReferenceChecks::Advisory,
            id_strategy: IdStrategy::Sequential,
            harvest_window_days: 90,
            currency_symbol: "$".into(),
        }
    }
}

/// The collaborators a handler needs besides the store itself.
pub struct HandlerContext<'a> {
    pub clock: &'a dyn Clock,
    pub sink: &'a mut dyn NotificationSink,
    pub policy: &'a EntryPolicy,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        clock: &'a dyn Clock,
        sink: &'a mut dyn NotificationSink,
        policy: &'a EntryPolicy,
    ) -> Self {
        Self {
            clock,
            sink,
            policy,
        }
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.sink.notify(notification);
    }
}

pub(crate) fn ensure_farm(store: &RecordStore, farm_id: &RecordId) -> ServiceResult<()> {
    if store.farm(farm_id).is_none() {
        return Err(ServiceError::UnknownFarm(farm_id.clone()));
    }
    Ok(())
}
