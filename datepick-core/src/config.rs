//! Picker configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bounds::{AvailabilityFilter, DateBounds};
use crate::calendar::{self, ZonedCalendar};
use crate::error::{PickerError, PickerResult};
use crate::selection::{SelectionMode, SelectionValue};
use crate::session::{PickerSession, PickerSessionBuilder};
use crate::shortcut::Shortcut;
use crate::style::StyleSheet;
use crate::transition::SelectionSettings;

const DEFAULT_TIMEZONE: &str = "UTC";

fn default_true() -> bool {
    true
}

fn default_first_weekday() -> u8 {
    1
}

/// Selection to start the session with. Dates are `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialSelection {
    Single { date: NaiveDate },
    Range { from: NaiveDate, to: NaiveDate },
}

/// A rolling-window shortcut ending today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomShortcut {
    pub name: String,
    /// humantime duration, e.g. "14days" or "2weeks"
    pub span: String,
}

/// Configuration at ~/.config/datepick/picker.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub mode: SelectionMode,

    #[serde(default)]
    pub allow_nil_selection: bool,

    #[serde(default = "default_true")]
    pub allow_range_edits: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_date: Option<NaiveDate>,

    #[serde(default)]
    pub only_available_dates: bool,

    #[serde(default)]
    pub available_days: Vec<NaiveDate>,

    /// 1 = Sunday, 2 = Monday, ...
    #[serde(default = "default_first_weekday")]
    pub first_weekday: u8,

    /// IANA zone name; the system zone when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<InitialSelection>,

    /// Built-in preset names (today, yesterday, tomorrow, last_week, last_month).
    #[serde(default)]
    pub shortcuts: Vec<String>,

    #[serde(default)]
    pub custom_shortcuts: Vec<CustomShortcut>,

    #[serde(default)]
    pub styles: StyleSheet,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            mode: SelectionMode::default(),
            allow_nil_selection: false,
            allow_range_edits: true,
            minimum_date: None,
            maximum_date: None,
            only_available_dates: false,
            available_days: Vec::new(),
            first_weekday: default_first_weekday(),
            timezone: None,
            initial: None,
            shortcuts: Vec::new(),
            custom_shortcuts: Vec::new(),
            styles: StyleSheet::default(),
        }
    }
}

impl PickerConfig {
    pub fn config_path() -> PickerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PickerError::Config("Could not determine config directory".into()))?
            .join("datepick");

        Ok(config_dir.join("picker.toml"))
    }

    /// Load config from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> PickerResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> PickerResult<Self> {
        toml::from_str(content).map_err(|e| PickerError::Config(e.to_string()))
    }

    pub fn settings(&self) -> SelectionSettings {
        SelectionSettings {
            mode: self.mode,
            allow_nil_selection: self.allow_nil_selection,
            allow_range_edits: self.allow_range_edits,
        }
    }

    /// Resolved timezone name: configured, else the system zone, else UTC.
    pub fn timezone_name(&self) -> String {
        self.timezone.clone().unwrap_or_else(|| {
            iana_time_zone::get_timezone().unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string())
        })
    }

    pub fn calendar(&self) -> PickerResult<ZonedCalendar> {
        ZonedCalendar::from_names(&self.timezone_name(), self.first_weekday)
    }

    pub fn bounds(&self, calendar: &ZonedCalendar) -> DateBounds {
        DateBounds::from_days(calendar, self.minimum_date, self.maximum_date)
    }

    pub fn availability(&self) -> AvailabilityFilter {
        AvailabilityFilter {
            only_available_dates: self.only_available_dates,
            available_days: self.available_days.iter().copied().collect(),
        }
    }

    pub fn initial_selection(&self, calendar: &ZonedCalendar) -> SelectionValue {
        match self.initial {
            None => SelectionValue::Empty,
            Some(InitialSelection::Single { date }) => SelectionValue::SingleDate {
                date: calendar::day_start(calendar, date),
            },
            Some(InitialSelection::Range { from, to }) => SelectionValue::range(
                calendar,
                calendar::day_start(calendar, from),
                calendar::day_start(calendar, to),
            ),
        }
    }

    /// Built-in presets first, then custom ones, in configuration order.
    pub fn build_shortcuts(&self) -> PickerResult<Vec<Shortcut>> {
        let builtin = self
            .shortcuts
            .iter()
            .map(|name| Shortcut::builtin(name, self.mode));
        let custom = self
            .custom_shortcuts
            .iter()
            .map(|c| Shortcut::rolling(&c.name, &c.span, self.mode));
        builtin.chain(custom).collect()
    }

    /// Session builder for this configuration on `calendar`.
    pub fn session(&self, calendar: ZonedCalendar) -> PickerResult<PickerSessionBuilder> {
        let bounds = self.bounds(&calendar);
        let initial = self.initial_selection(&calendar);
        Ok(PickerSession::builder(calendar, self.settings())
            .bounds(bounds)
            .availability(self.availability())
            .initial(initial)
            .shortcuts(self.build_shortcuts()?))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PickerResult<()> {
        let contents = "\
# datepick configuration

# \"single\" or \"range\":
# mode = \"single\"

# Tap the selected day again to clear the selection:
# allow_nil_selection = false

# Range mode: tapping edits the existing range instead of starting over:
# allow_range_edits = true

# Selectable dates (inclusive, quoted YYYY-MM-DD):
# minimum_date = \"2025-01-01\"
# maximum_date = \"2025-12-31\"

# Only allow the listed days:
# only_available_dates = false
# available_days = [\"2025-01-06\", \"2025-01-07\"]

# First day of the week, 1 = Sunday, 2 = Monday:
# first_weekday = 1

# IANA timezone (defaults to the system timezone):
# timezone = \"Europe/Berlin\"

# Start with a selection:
# initial = { from = \"2025-01-06\", to = \"2025-01-10\" }

# Presets: today, yesterday, tomorrow, last_week, last_month
# shortcuts = [\"today\", \"last_week\"]

# [[custom_shortcuts]]
# name = \"Last fortnight\"
# span = \"14days\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PickerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PickerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
