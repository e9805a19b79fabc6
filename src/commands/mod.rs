pub mod init;
pub mod shortcuts;
pub mod show;

use anyhow::Result;
use chrono::NaiveDate;
use datepick_core::calendar::{self, ZonedCalendar};
use datepick_core::config::PickerConfig;
use datepick_core::SelectionValue;

/// Calendar for `config`, optionally with a pinned "today".
pub fn calendar_for(config: &PickerConfig, today: Option<NaiveDate>) -> Result<ZonedCalendar> {
    let calendar = config.calendar()?;
    Ok(match today {
        Some(day) => calendar.with_today(day),
        None => calendar,
    })
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD..YYYY-MM-DD` into a selection.
pub fn parse_selection(calendar: &ZonedCalendar, spec: &str) -> Result<SelectionValue> {
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s.trim()))
    };

    match spec.split_once("..") {
        Some((from, to)) => Ok(SelectionValue::range(
            calendar,
            calendar::day_start(calendar, parse(from)?),
            calendar::day_start(calendar, parse(to)?),
        )),
        None => Ok(SelectionValue::SingleDate {
            date: calendar::day_start(calendar, parse(spec)?),
        }),
    }
}
