use std::{
    env,
    fs::{self, File},
    io::Write,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::View;
use crate::errors::FarmError;
use crate::services::{EntryPolicy, NumericInput, ReferenceChecks};
use crate::store::IdStrategy;

/// Environment variable that relocates the configuration directory.
pub const HOME_ENV: &str = "CROP_KEEPER_HOME";

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "crop_keeper";
const TMP_SUFFIX: &str = "tmp";

/// Accepted harvest windows, in days.
pub const HARVEST_WINDOW_DAYS: RangeInclusive<i64> = 0..=3650;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub harvest_window_days: i64,
    pub upcoming_limit: usize,
    pub id_strategy: IdStrategy,
    pub numeric_input: NumericInput,
    pub reference_checks: ReferenceChecks,
    pub dark_mode: bool,
    pub default_view: View,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            harvest_window_days: 90,
            upcoming_limit: 5,
            id_strategy: IdStrategy::Sequential,
            numeric_input: NumericInput::Coerce,
            reference_checks: ReferenceChecks::Advisory,
            dark_mode: false,
            default_view: View::Dashboard,
        }
    }
}

impl Config {
    pub fn entry_policy(&self) -> EntryPolicy {
        EntryPolicy {
            numeric_input: self.numeric_input,
            reference_checks: self.reference_checks,
            id_strategy: self.id_strategy,
            harvest_window_days: self.harvest_window_days,
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    pub const KEYS: &'static [&'static str] = &[
        "currency_symbol",
        "harvest_window_days",
        "upcoming_limit",
        "id_strategy",
        "numeric_input",
        "reference_checks",
        "dark_mode",
        "default_view",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FarmError> {
        let value = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "harvest_window_days" => {
                let days = parse_setting(key, value)?;
                check_harvest_window(days)?;
                self.harvest_window_days = days;
            }
            "upcoming_limit" => self.upcoming_limit = parse_setting(key, value)?,
            "id_strategy" => self.id_strategy = parse_json_setting(key, value)?,
            "numeric_input" => self.numeric_input = parse_json_setting(key, value)?,
            "reference_checks" => self.reference_checks = parse_json_setting(key, value)?,
            "dark_mode" => self.dark_mode = parse_setting(key, value)?,
            "default_view" => {
                self.default_view = value
                    .parse()
                    .map_err(|err| FarmError::Config(format!("{key}: {err}")))?
            }
            other => {
                return Err(FarmError::Config(format!("unknown setting `{other}`")));
            }
        }
        Ok(())
    }

    /// Rejects values a hand-edited file could carry but `set` would refuse.
    pub fn validate(&self) -> Result<(), FarmError> {
        check_harvest_window(self.harvest_window_days)
    }
}

fn check_harvest_window(days: i64) -> Result<(), FarmError> {
    if HARVEST_WINDOW_DAYS.contains(&days) {
        Ok(())
    } else {
        Err(FarmError::Config(format!(
            "harvest_window_days must be between {} and {}, got {days}",
            HARVEST_WINDOW_DAYS.start(),
            HARVEST_WINDOW_DAYS.end()
        )))
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, FarmError> {
    value
        .parse()
        .map_err(|_| FarmError::Config(format!("`{value}` is not a valid value for {key}")))
}

/// Unit-variant enums reuse their serde names, e.g. `strict` or `uuid`.
fn parse_json_setting<T: serde::de::DeserializeOwned>(
    key: &str,
    value: &str,
) -> Result<T, FarmError> {
    serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase()))
        .map_err(|_| FarmError::Config(format!("`{value}` is not a valid value for {key}")))
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the config file from `CROP_KEEPER_HOME`, then the platform
    /// config directory, then the working directory.
    pub fn new() -> Self {
        let base = env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            path: base.into().join(CONFIG_FILE),
        }
    }

    /// Reads the config; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config, FarmError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), FarmError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), FarmError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
