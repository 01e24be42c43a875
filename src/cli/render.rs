//! Text renderings of the dashboard views.
//!
//! Renderers only read the state and return strings, so the shell decides
//! where the text goes.

use std::fmt::Write;

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

use crate::app::AppState;
use crate::config::Config;
use crate::domain::{Crop, CropStatus, Task, TaskPriority, View, WeatherReport};
use crate::services::SummaryService;
use crate::store::list_by_farm;
use crate::utils::dates::{format_long, format_short, is_tomorrow};

const CATEGORY_PREVIEW: usize = 3;

pub fn money(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

fn heading(state: &AppState, text: &str) -> ColoredString {
    if state.dark_mode {
        text.bright_white().bold()
    } else {
        text.green().bold()
    }
}

fn priority_badge(priority: TaskPriority) -> ColoredString {
    match priority {
        TaskPriority::High => priority.label().red(),
        TaskPriority::Medium => priority.label().yellow(),
        TaskPriority::Low => priority.label().normal(),
    }
}

fn status_badge(status: CropStatus) -> ColoredString {
    match status {
        CropStatus::Growing => status.label().green(),
        CropStatus::Flowering => status.label().yellow(),
        CropStatus::Planted | CropStatus::Harvested => status.label().normal(),
    }
}

/// Colors a task by urgency: done, due today, due tomorrow, later.
fn task_title(task: &Task, today: NaiveDate) -> ColoredString {
    if task.completed {
        task.title.as_str().green().strikethrough()
    } else if task.is_due_on(today) {
        task.title.as_str().red()
    } else if is_tomorrow(task.scheduled_date, today) {
        task.title.as_str().yellow()
    } else {
        task.title.as_str().normal()
    }
}

pub fn render_view(state: &AppState, view: View, today: NaiveDate, config: &Config) -> String {
    match view {
        View::Dashboard => render_dashboard(state, today, config),
        View::Crops => render_crops(state, today),
        View::Tasks => render_tasks(state, today),
        View::Expenses => render_expenses(state, config),
        View::Weather => render_weather(state),
        View::Analytics => render_analytics(state, config),
    }
}

pub fn render_dashboard(state: &AppState, today: NaiveDate, config: &Config) -> String {
    let mut out = String::new();
    let farm_id = &state.selected_farm;
    if let Some(farm) = state.selected_farm() {
        let _ = writeln!(out, "{}", heading(state, &farm.name));
        let _ = writeln!(out, "{} · {} acres", farm.location, farm.size);
    }

    let summary = SummaryService::dashboard(&state.store, farm_id, today, config.upcoming_limit);
    let _ = writeln!(out);
    let _ = writeln!(out, "Active crops    {}", summary.crop_count);
    let _ = writeln!(out, "Planted area    {} acres", summary.planted_area);
    let _ = writeln!(out, "Today's tasks   {}", summary.today_task_count);
    let _ = writeln!(
        out,
        "Total expenses  {}",
        money(&config.currency_symbol, summary.total_expenses)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading(state, "Upcoming Tasks"));
    if summary.upcoming.is_empty() {
        let _ = writeln!(out, "  Nothing scheduled.");
    }
    for task in &summary.upcoming {
        let _ = writeln!(
            out,
            "  {} [{}] {} · {}",
            task_title(task, today),
            priority_badge(task.priority),
            format_short(task.scheduled_date),
            task.description
        );
    }

    if let Some(weather) = state.store.weather() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", heading(state, "Weather"));
        let _ = writeln!(
            out,
            "  {}°F {} · Humidity {}%",
            weather.temperature, weather.condition, weather.humidity
        );
    }
    out
}

pub fn render_crops(state: &AppState, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(state, View::Crops.title()));
    let crops = list_by_farm(state.store.crops(), &state.selected_farm);
    if crops.is_empty() {
        let _ = writeln!(out, "No crops recorded. Use `crop add name=<name>` to plant one.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<6} {:<14} {:<14} {:<10} {:>8}  {:<8} {:<8}",
        "ID", "Crop", "Variety", "Status", "Acres", "Planted", "Harvest"
    );
    for crop in crops {
        let _ = writeln!(out, "{}", crop_row(crop, today));
    }
    out
}

fn crop_row(crop: &Crop, today: NaiveDate) -> String {
    let remaining = crop.days_to_harvest(today);
    let countdown = if remaining >= 0 {
        format!("{remaining}d to harvest")
    } else {
        "harvest due".to_string()
    };
    format!(
        "{:<6} {:<14} {:<14} {:<10} {:>8}  {:<8} {:<8} {}",
        crop.id.as_str(),
        crop.name,
        crop.variety,
        status_badge(crop.status),
        crop.area,
        format_short(crop.planted_date),
        format_short(crop.expected_harvest_date),
        countdown
    )
}

pub fn render_tasks(state: &AppState, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(state, View::Tasks.title()));
    let tasks = list_by_farm(state.store.tasks(), &state.selected_farm);
    if tasks.is_empty() {
        let _ = writeln!(out, "No tasks scheduled. Use `task add title=<title>` to add one.");
        return out;
    }
    for task in tasks {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let crop = task
            .crop_id
            .as_ref()
            .and_then(|id| state.store.crop(id))
            .map(|crop| format!(" · {}", crop.name))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {:<6} {} ({}) [{}]{}",
            check,
            task.id.as_str(),
            task_title(task, today),
            format_long(task.scheduled_date),
            priority_badge(task.priority),
            crop
        );
        if !task.description.is_empty() {
            let _ = writeln!(out, "           {}", task.description);
        }
    }
    out
}

pub fn render_expenses(state: &AppState, config: &Config) -> String {
    let mut out = String::new();
    let farm_id = &state.selected_farm;
    let symbol = &config.currency_symbol;
    let _ = writeln!(out, "{}", heading(state, View::Expenses.title()));
    let _ = writeln!(
        out,
        "Total expenses  {}",
        money(symbol, SummaryService::total_expenses(&state.store, farm_id))
    );
    for (category, amount) in SummaryService::expenses_by_category(&state.store, farm_id)
        .iter()
        .take(CATEGORY_PREVIEW)
    {
        let _ = writeln!(out, "  {:<12} {}", category.label(), money(symbol, amount));
    }

    let expenses = list_by_farm(state.store.expenses(), farm_id);
    let _ = writeln!(out);
    if expenses.is_empty() {
        let _ = writeln!(out, "No expenses recorded.");
        return out;
    }
    for expense in expenses {
        let _ = writeln!(
            out,
            "{:<6} {:<14} {:<12} {:>12}  {}",
            expense.id.as_str(),
            format_long(expense.date),
            expense.category.label(),
            money(symbol, expense.amount),
            expense.description
        );
    }
    out
}

pub fn render_weather(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(state, View::Weather.title()));
    let Some(report) = state.store.weather() else {
        let _ = writeln!(out, "No weather data available.");
        return out;
    };
    write_weather(&mut out, report);
    out
}

fn write_weather(out: &mut String, report: &WeatherReport) {
    let _ = writeln!(
        out,
        "Now: {}°F, {}, humidity {}%",
        report.temperature, report.condition, report.humidity
    );
    let _ = writeln!(out, "Forecast:");
    for day in &report.forecast {
        let _ = writeln!(
            out,
            "  {:<10} {:>4}°F  {}",
            day.day, day.temperature, day.condition
        );
    }
    let _ = writeln!(out, "Advisories:");
    for advisory in report.advisories() {
        let _ = writeln!(out, "  - {}", advisory.message());
    }
}

pub fn render_analytics(state: &AppState, config: &Config) -> String {
    let mut out = String::new();
    let farm_id = &state.selected_farm;
    let symbol = &config.currency_symbol;
    let _ = writeln!(out, "{}", heading(state, View::Analytics.title()));

    let total = SummaryService::total_expenses(&state.store, farm_id);
    let _ = writeln!(out, "Spending by category");
    for (category, amount) in SummaryService::expenses_by_category(&state.store, farm_id).iter() {
        let share = if total > 0.0 { amount / total * 100.0 } else { 0.0 };
        let _ = writeln!(
            out,
            "  {:<12} {:>12} {:>5.1}%",
            category.label(),
            money(symbol, amount),
            share
        );
    }

    let _ = writeln!(out, "Spending by month");
    for point in SummaryService::expenses_by_month(&state.store, farm_id) {
        let breakdown: Vec<String> = point
            .totals
            .iter()
            .map(|(category, amount)| format!("{} {}", category.label(), money(symbol, amount)))
            .collect();
        let _ = writeln!(
            out,
            "  {:<9} {:>12}  ({})",
            point.label,
            money(symbol, point.total()),
            breakdown.join(", ")
        );
    }

    let stats = SummaryService::task_stats(&state.store, farm_id);
    let _ = writeln!(
        out,
        "Tasks: {} done of {} ({:.0}%), {} pending",
        stats.completed,
        stats.total,
        stats.completion_ratio() * 100.0,
        stats.pending
    );
    out
}
