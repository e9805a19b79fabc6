//! Named presets ("today", "last week", ...) and matching them against the
//! current selection.

use std::fmt;

use chrono::NaiveDate;

use crate::calendar::{self, Calendar};
use crate::error::{PickerError, PickerResult};
use crate::selection::{SelectionMode, SelectionValue};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Names accepted by [`Shortcut::builtin`].
pub const BUILTIN_SHORTCUTS: [&str; 5] = ["today", "yesterday", "tomorrow", "last_week", "last_month"];

type Generator = Box<dyn Fn(&dyn Calendar) -> SelectionValue>;

/// A named preset that produces a selection from the calendar's "today".
pub struct Shortcut {
    name: String,
    generator: Generator,
}

impl Shortcut {
    pub fn new<F>(name: impl Into<String>, generator: F) -> Self
    where
        F: Fn(&dyn Calendar) -> SelectionValue + 'static,
    {
        Shortcut {
            name: name.into(),
            generator: Box::new(generator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The selection this preset stands for right now.
    pub fn generate(&self, calendar: &dyn Calendar) -> SelectionValue {
        (self.generator)(calendar)
    }

    /// Whether the current selection equals this preset, day for day.
    pub fn is_active(&self, calendar: &dyn Calendar, current: &SelectionValue) -> bool {
        self.generate(calendar).same_days(current, calendar)
    }

    /// Look up a built-in preset for a picker of `mode`.
    pub fn builtin(name: &str, mode: SelectionMode) -> PickerResult<Self> {
        match name {
            "today" => Ok(Self::day_offset("Today", 0, mode)),
            "yesterday" => Ok(Self::day_offset("Yesterday", -1, mode)),
            "tomorrow" => Ok(Self::day_offset("Tomorrow", 1, mode)),
            "last_week" => Self::trailing_days("Last week", 7, mode),
            "last_month" => {
                require_range(name, mode)?;
                Ok(Shortcut::new("Last month", |cal| {
                    let today = today_start(cal);
                    SelectionValue::range(cal, calendar::add_months(cal, today, -1), today)
                }))
            }
            other => Err(PickerError::UnknownShortcut(other.to_string())),
        }
    }

    /// A rolling window ending today, sized by humantime text such as `"14days"`.
    pub fn rolling(name: &str, span: &str, mode: SelectionMode) -> PickerResult<Self> {
        let duration = humantime::parse_duration(span)
            .map_err(|e| PickerError::InvalidSpan(span.to_string(), e.to_string()))?;
        let days = duration.as_secs() / SECONDS_PER_DAY;
        if days == 0 {
            return Err(PickerError::InvalidSpan(
                span.to_string(),
                "span must cover at least one day".to_string(),
            ));
        }
        let days = i64::try_from(days)
            .ok()
            .filter(|d| *d <= max_span_days())
            .ok_or_else(|| {
                PickerError::InvalidSpan(span.to_string(), "span is too long".to_string())
            })?;
        Self::trailing_days(name, days, mode)
    }

    fn day_offset(name: &str, offset: i64, mode: SelectionMode) -> Self {
        Shortcut::new(name, move |cal| {
            match (calendar::add_days(cal, today_start(cal), offset), mode) {
                (None, _) => SelectionValue::Empty,
                (Some(date), SelectionMode::Single) => SelectionValue::SingleDate { date },
                (Some(date), SelectionMode::Range) => SelectionValue::day_range(cal, date),
            }
        })
    }

    fn trailing_days(name: &str, days: i64, mode: SelectionMode) -> PickerResult<Self> {
        require_range(name, mode)?;
        Ok(Shortcut::new(name, move |cal| {
            let today = today_start(cal);
            match calendar::add_days(cal, today, -days) {
                Some(from) => SelectionValue::range(cal, from, today),
                None => SelectionValue::Empty,
            }
        }))
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut").field("name", &self.name).finish()
    }
}

fn today_start(cal: &dyn Calendar) -> calendar::Date {
    calendar::day_start(cal, cal.today())
}

/// Longest window any calendar day can reach back over.
fn max_span_days() -> i64 {
    NaiveDate::MAX.signed_duration_since(NaiveDate::MIN).num_days()
}

fn require_range(name: &str, mode: SelectionMode) -> PickerResult<()> {
    match mode {
        SelectionMode::Range => Ok(()),
        SelectionMode::Single => Err(PickerError::ModeMismatch(name.to_string(), mode.to_string())),
    }
}
