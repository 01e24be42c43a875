//! Aggregation views. Every figure is recomputed from the store on each
//! call; nothing is cached.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{ExpenseCategory, RecordId, Task, TaskPriority};
use crate::store::{list_by_farm, RecordStore};
use crate::utils::dates::month_label;

/// Per-category sums in the order each category first appears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(Vec<(ExpenseCategory, f64)>);

impl CategoryTotals {
    fn add(&mut self, category: ExpenseCategory, amount: f64) {
        match self.0.iter_mut().find(|(existing, _)| *existing == category) {
            Some((_, total)) => *total += amount,
            None => self.0.push((category, amount)),
        }
    }

    pub fn get(&self, category: ExpenseCategory) -> Option<f64> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().map(|(_, total)| total).sum()
    }
}

/// One point of the stacked monthly expense series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyExpenses {
    /// `Mar 2024`
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub totals: CategoryTotals,
}

impl MonthlyExpenses {
    pub fn total(&self) -> f64 {
        self.totals.sum()
    }
}

/// Open tasks of a farm, with the subset that is due today.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingTasks<'a> {
    pub upcoming: Vec<&'a Task>,
    pub today: Vec<&'a Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    pub crop_count: usize,
    pub planted_area: f64,
    pub today_task_count: usize,
    pub total_expenses: f64,
    /// The first few open tasks, in insertion order.
    pub upcoming: Vec<&'a Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmOverview {
    pub farm_id: RecordId,
    pub crop_count: usize,
    pub task_count: usize,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub pending_by_priority: BTreeMap<TaskPriority, usize>,
}

impl TaskStats {
    /// Share of tasks done, 0.0 when there are none.
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_expenses(store: &RecordStore, farm_id: &RecordId) -> f64 {
        list_by_farm(store.expenses(), farm_id)
            .into_iter()
            .map(|expense| expense.amount)
            .sum()
    }

    pub fn expenses_by_category(store: &RecordStore, farm_id: &RecordId) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for expense in list_by_farm(store.expenses(), farm_id) {
            totals.add(expense.category, expense.amount);
        }
        totals
    }

    /// Monthly buckets sorted oldest first.
    pub fn expenses_by_month(store: &RecordStore, farm_id: &RecordId) -> Vec<MonthlyExpenses> {
        let mut buckets: BTreeMap<(i32, u32), CategoryTotals> = BTreeMap::new();
        for expense in list_by_farm(store.expenses(), farm_id) {
            buckets
                .entry((expense.date.year(), expense.date.month()))
                .or_default()
                .add(expense.category, expense.amount);
        }
        debug!(farm_id = %farm_id, months = buckets.len(), "derived monthly expense series");
        buckets
            .into_iter()
            .map(|((year, month), totals)| MonthlyExpenses {
                label: NaiveDate::from_ymd_opt(year, month, 1)
                    .map(month_label)
                    .unwrap_or_default(),
                year,
                month,
                totals,
            })
            .collect()
    }

    pub fn upcoming_tasks<'a>(
        store: &'a RecordStore,
        farm_id: &RecordId,
        today: NaiveDate,
    ) -> UpcomingTasks<'a> {
        let upcoming: Vec<&Task> = list_by_farm(store.tasks(), farm_id)
            .into_iter()
            .filter(|task| !task.completed)
            .collect();
        let due_today = upcoming
            .iter()
            .copied()
            .filter(|task| task.is_due_on(today))
            .collect();
        UpcomingTasks {
            upcoming,
            today: due_today,
        }
    }

    pub fn dashboard<'a>(
        store: &'a RecordStore,
        farm_id: &RecordId,
        today: NaiveDate,
        limit: usize,
    ) -> DashboardSummary<'a> {
        let crops = list_by_farm(store.crops(), farm_id);
        let UpcomingTasks {
            mut upcoming,
            today: due_today,
        } = Self::upcoming_tasks(store, farm_id, today);
        upcoming.truncate(limit);
        DashboardSummary {
            crop_count: crops.len(),
            planted_area: crops.iter().map(|crop| crop.area).sum(),
            today_task_count: due_today.len(),
            total_expenses: Self::total_expenses(store, farm_id),
            upcoming,
        }
    }

    pub fn farm_overview(store: &RecordStore, farm_id: &RecordId) -> FarmOverview {
        FarmOverview {
            farm_id: farm_id.clone(),
            crop_count: list_by_farm(store.crops(), farm_id).len(),
            task_count: list_by_farm(store.tasks(), farm_id).len(),
            expense_count: list_by_farm(store.expenses(), farm_id).len(),
        }
    }

    pub fn task_stats(store: &RecordStore, farm_id: &RecordId) -> TaskStats {
        let mut stats = TaskStats::default();
        for task in list_by_farm(store.tasks(), farm_id) {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
                *stats.pending_by_priority.entry(task.priority).or_default() += 1;
            }
        }
        stats
    }
}
