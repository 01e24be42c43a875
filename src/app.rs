//! Application state and the actions that move it forward.
//!
//! `AppState::apply` never mutates the state it is called on. It returns
//! the next state, so a failed action leaves the caller holding the previous
//! one unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{EntityKind, Farm, RecordId, View};
use crate::services::{
    CropService, ExpenseService, FormFields, HandlerContext, RecordService, ServiceError,
    ServiceResult, TaskService,
};
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectFarm(RecordId),
    SelectView(View),
    SetDarkMode(bool),
    ToggleDarkMode,
    AddCrop(FormFields),
    AddTask(FormFields),
    AddExpense(FormFields),
    ToggleTask(RecordId),
    Delete { kind: EntityKind, id: RecordId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub store: RecordStore,
    pub selected_farm: RecordId,
    pub active_view: View,
    pub dark_mode: bool,
}

impl AppState {
    /// Builds a state over `store` with its first farm selected.
    pub fn new(store: RecordStore) -> ServiceResult<Self> {
        let selected_farm = store
            .farms()
            .first()
            .map(|farm| farm.id.clone())
            .ok_or(ServiceError::NoFarms)?;
        Ok(Self {
            store,
            selected_farm,
            active_view: View::default(),
            dark_mode: false,
        })
    }

    pub fn selected_farm(&self) -> Option<&Farm> {
        self.store.farm(&self.selected_farm)
    }

    pub fn apply(&self, action: Action, ctx: &mut HandlerContext<'_>) -> ServiceResult<AppState> {
        debug!(?action, "applying action");
        let mut next = self.clone();
        let farm_id = self.selected_farm.clone();
        match action {
            Action::SelectFarm(id) => {
                if next.store.farm(&id).is_none() {
                    return Err(ServiceError::UnknownFarm(id));
                }
                next.selected_farm = id;
            }
            Action::SelectView(view) => next.active_view = view,
            Action::SetDarkMode(enabled) => next.dark_mode = enabled,
            Action::ToggleDarkMode => next.dark_mode = !next.dark_mode,
            Action::AddCrop(form) => {
                CropService::add(&mut next.store, &form, &farm_id, ctx)?;
            }
            Action::AddTask(form) => {
                TaskService::add(&mut next.store, &form, &farm_id, ctx)?;
            }
            Action::AddExpense(form) => {
                ExpenseService::add(&mut next.store, &form, &farm_id, ctx)?;
            }
            Action::ToggleTask(id) => {
                TaskService::toggle_complete(&mut next.store, &id, ctx);
            }
            Action::Delete { kind, id } => {
                RecordService::delete(&mut next.store, kind, &id, ctx);
            }
        }
        Ok(next)
    }
}
