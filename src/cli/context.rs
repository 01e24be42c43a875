use std::io;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::app::{Action, AppState};
use crate::cli::commands::{self, CommandDefinition, CommandRegistry};
use crate::cli::output;
use crate::cli::render;
use crate::config::{Config, ConfigManager};
use crate::domain::View;
use crate::errors::FarmError;
use crate::notify::NotificationLog;
use crate::services::{HandlerContext, ServiceError, SummaryService};
use crate::store::RecordStore;
use crate::utils::dates::{parse_form_date, Clock, FixedClock, SystemClock};

/// Pins "today" for the shell, e.g. `CROP_KEEPER_TODAY=2024-05-20`.
pub const TODAY_ENV: &str = "CROP_KEEPER_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FarmError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Core(#[from] FarmError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) state: AppState,
    pub(crate) config: Config,
    config_manager: ConfigManager,
    clock: Box<dyn Clock>,
    registry: &'static CommandRegistry,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new();
        let config = config_manager.load()?;
        let clock: Box<dyn Clock> = match std::env::var(TODAY_ENV)
            .ok()
            .and_then(|raw| parse_form_date(&raw))
        {
            Some(day) => Box::new(FixedClock(day)),
            None => Box::new(SystemClock),
        };
        Self::with_parts(mode, config, config_manager, clock)
    }

    pub(crate) fn with_parts(
        mode: CliMode,
        config: Config,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut state = AppState::new(RecordStore::seeded(clock.today()))?;
        state.active_view = config.default_view;
        state.dark_mode = config.dark_mode;
        Ok(Self {
            mode,
            state,
            config,
            config_manager,
            clock,
            registry: commands::registry(),
            running: true,
        })
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub(crate) fn registry(&self) -> &'static CommandRegistry {
        self.registry
    }

    pub(crate) fn command(&self, name: &str) -> Option<&'static CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let farm = self
            .state
            .selected_farm()
            .map(|farm| farm.name.as_str())
            .unwrap_or("no farm");
        let open = SummaryService::upcoming_tasks(
            &self.state.store,
            &self.state.selected_farm,
            self.today(),
        )
        .upcoming
        .len();
        format!("{} [{}] ({} open) > ", farm, self.state.active_view, open)
    }

    /// Runs `action` against the current state and adopts the result.
    /// Notifications are printed whether or not the action succeeded.
    pub(crate) fn apply(&mut self, action: Action) -> Result<(), CommandError> {
        let policy = self.config.entry_policy();
        let mut log = NotificationLog::new();
        let outcome = {
            let mut ctx = HandlerContext::new(self.clock.as_ref(), &mut log, &policy);
            self.state.apply(action, &mut ctx)
        };
        for notification in log.entries() {
            output::notification(notification);
        }
        self.state = outcome?;
        Ok(())
    }

    pub(crate) fn show(&self, view: View) {
        print!(
            "{}",
            render::render_view(&self.state, view, self.today(), &self.config)
        );
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> CommandResult {
        match self.registry.get(command) {
            Some(definition) => (definition.handler)(self, args),
            None => {
                self.suggest_command(raw);
                Ok(LoopControl::Continue)
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}
