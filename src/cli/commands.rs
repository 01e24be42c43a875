use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::app::Action;
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::domain::{EntityKind, RecordId, View};
use crate::errors::FarmError;
use crate::services::{fields, FormFields, SummaryService};
use crate::utils::build_info;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

static REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| CommandRegistry::new(definitions()));

pub(crate) fn registry() -> &'static CommandRegistry {
    &REGISTRY
}

fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_exit),
        CommandDefinition::new(
            "view",
            "Switch to a dashboard view and show it",
            "view <dashboard|crops|tasks|expenses|weather|analytics>",
            cmd_view,
        ),
        CommandDefinition::new("show", "Show the active view again", "show", cmd_show),
        CommandDefinition::new(
            "farm",
            "List farms or select one",
            "farm <list|use <id>>",
            cmd_farm,
        ),
        CommandDefinition::new(
            "crop",
            "Manage crops",
            "crop <list|add name=.. [variety=..] [area=..] [planted=YYYY-MM-DD] [harvest=YYYY-MM-DD]|remove <id>>",
            cmd_crop,
        ),
        CommandDefinition::new(
            "task",
            "Manage field tasks",
            "task <list|add title=.. [priority=low|medium|high] [date=YYYY-MM-DD] [crop=<id>] [description=..]|toggle <id>|remove <id>>",
            cmd_task,
        ),
        CommandDefinition::new(
            "expense",
            "Manage expenses",
            "expense <list|add amount=.. category=.. [date=YYYY-MM-DD] [description=..]|remove <id>>",
            cmd_expense,
        ),
        CommandDefinition::new(
            "theme",
            "Switch the colour theme",
            "theme <dark|light|toggle>",
            cmd_theme,
        ),
        CommandDefinition::new(
            "config",
            "Show, change or save settings",
            "config <show|set <key> <value>|save>",
            cmd_config,
        ),
    ]
}

fn usage_error(context: &ShellContext, name: &str) -> CommandError {
    let usage = context
        .command(name)
        .map(|definition| definition.usage)
        .unwrap_or(name);
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(definition) => {
                output::info(format!("{} - {}", definition.name, definition.description));
                output::info(format!("usage: {}", definition.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(LoopControl::Continue);
    }
    output::section("Commands");
    for definition in context.registry().iter() {
        output::info(format!("{:<8} {}", definition.name, definition.description));
    }
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Ok(LoopControl::Exit)
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(usage_error(context, "view"));
    };
    let view = raw
        .parse::<View>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    context.apply(Action::SelectView(view))?;
    context.show(view);
    Ok(LoopControl::Continue)
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show(context.state.active_view);
    Ok(LoopControl::Continue)
}

fn cmd_farm(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            for farm in context.state.store.farms() {
                let overview = SummaryService::farm_overview(&context.state.store, &farm.id);
                let marker = if farm.id == context.state.selected_farm { "*" } else { " " };
                output::info(format!(
                    "{} {:<4} {} ({}, {} acres) - {} crops, {} tasks",
                    marker,
                    farm.id.as_str(),
                    farm.name,
                    farm.location,
                    farm.size,
                    overview.crop_count,
                    overview.task_count
                ));
            }
            Ok(LoopControl::Continue)
        }
        ["use", id] => {
            context.apply(Action::SelectFarm(RecordId::from(*id)))?;
            if let Some(farm) = context.state.selected_farm() {
                output::success(format!("Now managing {}.", farm.name));
            }
            Ok(LoopControl::Continue)
        }
        _ => Err(usage_error(context, "farm")),
    }
}

fn cmd_crop(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            context.show(View::Crops);
            Ok(LoopControl::Continue)
        }
        ["add", rest @ ..] => {
            let form = parse_form(EntityKind::Crop, rest)?;
            context.apply(Action::AddCrop(form))?;
            Ok(LoopControl::Continue)
        }
        ["remove" | "delete", id] => remove(context, EntityKind::Crop, id),
        _ => Err(usage_error(context, "crop")),
    }
}

fn cmd_task(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            context.show(View::Tasks);
            Ok(LoopControl::Continue)
        }
        ["add", rest @ ..] => {
            let form = parse_form(EntityKind::Task, rest)?;
            context.apply(Action::AddTask(form))?;
            Ok(LoopControl::Continue)
        }
        ["toggle" | "done", id] => {
            context.apply(Action::ToggleTask(RecordId::from(*id)))?;
            Ok(LoopControl::Continue)
        }
        ["remove" | "delete", id] => remove(context, EntityKind::Task, id),
        _ => Err(usage_error(context, "task")),
    }
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            context.show(View::Expenses);
            Ok(LoopControl::Continue)
        }
        ["add", rest @ ..] => {
            let form = parse_form(EntityKind::Expense, rest)?;
            context.apply(Action::AddExpense(form))?;
            Ok(LoopControl::Continue)
        }
        ["remove" | "delete", id] => remove(context, EntityKind::Expense, id),
        _ => Err(usage_error(context, "expense")),
    }
}

fn remove(context: &mut ShellContext, kind: EntityKind, id: &str) -> CommandResult {
    let id = RecordId::from(id);
    let prompt = format!("Delete {} {}?", kind.label().to_lowercase(), id);
    if context.confirm(&prompt)? {
        context.apply(Action::Delete { kind, id })?;
    }
    Ok(LoopControl::Continue)
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = match args {
        ["dark"] => Action::SetDarkMode(true),
        ["light"] => Action::SetDarkMode(false),
        [] | ["toggle"] => Action::ToggleDarkMode,
        _ => return Err(usage_error(context, "theme")),
    };
    context.apply(action)?;
    let mode = if context.state.dark_mode { "dark" } else { "light" };
    output::info(format!("Theme: {mode}"));
    Ok(LoopControl::Continue)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::info(format!(
                "config file: {}",
                context.config_manager().path().display()
            ));
            let json = serde_json::to_string_pretty(&context.config).map_err(FarmError::from)?;
            output::info(json);
            Ok(LoopControl::Continue)
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            context.config.set(key, &value.join(" "))?;
            output::success(format!("{key} updated."));
            // Display settings also apply to the running session.
            match *key {
                "dark_mode" => context.apply(Action::SetDarkMode(context.config.dark_mode))?,
                "default_view" => context.apply(Action::SelectView(context.config.default_view))?,
                _ => {}
            }
            Ok(LoopControl::Continue)
        }
        ["save"] => {
            context.config_manager().save(&context.config)?;
            output::success(format!(
                "Saved settings to {}.",
                context.config_manager().path().display()
            ));
            Ok(LoopControl::Continue)
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config <show|set <key> <value>|save>; keys: {}",
            crate::config::Config::KEYS.join(", ")
        ))),
    }
}

/// Turns `key=value` arguments into form fields, accepting the short and
/// camelCase spellings of each field name.
pub(crate) fn parse_form(kind: EntityKind, args: &[&str]) -> Result<FormFields, CommandError> {
    let mut form = FormFields::new();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            CommandError::InvalidArguments(format!("expected key=value, got `{arg}`"))
        })?;
        form.insert(canonical_field(kind, key.trim()), value);
    }
    Ok(form)
}

fn canonical_field(kind: EntityKind, key: &str) -> String {
    let canonical = match (kind, key) {
        (EntityKind::Crop, "planted" | "plantedDate") => fields::PLANTED_DATE,
        (EntityKind::Crop, "harvest" | "expectedHarvestDate") => fields::EXPECTED_HARVEST_DATE,
        (EntityKind::Task, "crop" | "cropId") => fields::CROP_ID,
        (EntityKind::Task, "date" | "scheduled" | "scheduledDate") => fields::SCHEDULED_DATE,
        (_, "desc") => fields::DESCRIPTION,
        (_, other) => return other.to_string(),
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::CliMode;
    use crate::config::{Config, ConfigManager};
    use crate::utils::dates::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn form_arguments_use_canonical_names() {
        let form = parse_form(
            EntityKind::Crop,
            &["name=Corn", "planted=2024-04-01", "area=50"],
        )
        .unwrap();
        assert_eq!(form.get(fields::NAME), Some("Corn"));
        assert_eq!(form.get(fields::PLANTED_DATE), Some("2024-04-01"));

        let task = parse_form(EntityKind::Task, &["title=Weed", "date=2024-04-02"]).unwrap();
        assert_eq!(task.get(fields::SCHEDULED_DATE), Some("2024-04-02"));
        assert_eq!(task.get(fields::DATE), None);

        let expense = parse_form(EntityKind::Expense, &["date=2024-04-03"]).unwrap();
        assert_eq!(expense.get(fields::DATE), Some("2024-04-03"));
    }

    #[test]
    fn bare_words_are_rejected() {
        assert!(matches!(
            parse_form(EntityKind::Expense, &["amount"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn display_settings_take_effect_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = ShellContext::with_parts(
            CliMode::Script,
            Config::default(),
            ConfigManager::with_base_dir(dir.path()),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())),
        )
        .unwrap();

        cmd_config(&mut context, &["set", "dark_mode", "true"]).unwrap();
        cmd_config(&mut context, &["set", "default_view", "Analytics"]).unwrap();

        assert!(context.state.dark_mode);
        assert_eq!(context.state.active_view, View::Analytics);
        assert!(context.config.dark_mode);
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let names: Vec<&str> = registry().names().take(3).collect();
        assert_eq!(names, ["help", "version", "exit"]);
    }
}
