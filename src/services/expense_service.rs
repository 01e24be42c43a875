use tracing::info;

use crate::domain::{Expense, ExpenseCategory, RecordId};
use crate::notify::Notification;
use crate::store::RecordStore;

use super::{ensure_farm, fields, FormFields, HandlerContext, ServiceError, ServiceResult};

pub struct ExpenseService;

impl ExpenseService {
    /// Books an expense against `farm_id` and returns its id.
    pub fn add(
        store: &mut RecordStore,
        form: &FormFields,
        farm_id: &RecordId,
        ctx: &mut HandlerContext<'_>,
    ) -> ServiceResult<RecordId> {
        ensure_farm(store, farm_id)?;
        let category: ExpenseCategory = form
            .choice(fields::CATEGORY)?
            .ok_or(ServiceError::MissingField(fields::CATEGORY))?;
        let amount = form.quantity(fields::AMOUNT, ctx)?;

        let expense = Expense {
            id: store.allocate_id(ctx.policy.id_strategy),
            farm_id: farm_id.clone(),
            amount,
            category,
            description: form.text(fields::DESCRIPTION),
            date: form.date_or(fields::DATE, ctx.clock.today()),
        };
        let id = expense.id.clone();
        info!(expense_id = %id, farm_id = %farm_id, amount, category = %category, "expense added");
        ctx.notify(Notification::success(format!(
            "Expense of {}{} added successfully!",
            ctx.policy.currency_symbol, expense.amount
        )));

        let mut expenses = store.expenses().to_vec();
        expenses.push(expense);
        store.replace_expenses(expenses);
        Ok(id)
    }
}
