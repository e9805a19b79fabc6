//! Tap handling: computes the next selection from the current one.
//!
//! Range editing treats the two existing endpoints as anchors. Tapping
//! outside the range moves the nearer-relevant edge out to the tapped day,
//! and tapping an endpoint collapses the range onto that endpoint's day.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, Calendar, Date};
use crate::selection::{SelectionMode, SelectionValue};

/// Per-session selection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    pub mode: SelectionMode,
    /// Tapping the selected day again clears the selection.
    pub allow_nil_selection: bool,
    /// Range mode only. When false, a tap on a multi-day range starts over.
    pub allow_range_edits: bool,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        SelectionSettings {
            mode: SelectionMode::Single,
            allow_nil_selection: false,
            allow_range_edits: true,
        }
    }
}

impl SelectionSettings {
    pub fn single() -> Self {
        SelectionSettings::default()
    }

    pub fn range() -> Self {
        SelectionSettings {
            mode: SelectionMode::Range,
            ..SelectionSettings::default()
        }
    }

    pub fn with_nil_selection(mut self, allow: bool) -> Self {
        self.allow_nil_selection = allow;
        self
    }

    pub fn with_range_edits(mut self, allow: bool) -> Self {
        self.allow_range_edits = allow;
        self
    }
}

/// Next selection after a tap on `tapped`.
///
/// Eligibility of `tapped` is not checked here; callers only forward taps on
/// enabled days.
pub fn next_selection<C: Calendar + ?Sized>(
    calendar: &C,
    settings: &SelectionSettings,
    current: &SelectionValue,
    tapped: Date,
) -> SelectionValue {
    let next = match settings.mode {
        SelectionMode::Single => next_single(calendar, settings, current, tapped),
        SelectionMode::Range => next_range(calendar, settings, current, tapped),
    };
    debug!(
        "event=selection_transition mode={} tapped={} next={}",
        settings.mode,
        tapped.to_rfc3339(),
        next
    );
    next
}

fn next_single<C: Calendar + ?Sized>(
    calendar: &C,
    settings: &SelectionSettings,
    current: &SelectionValue,
    tapped: Date,
) -> SelectionValue {
    match current {
        SelectionValue::SingleDate { date }
            if settings.allow_nil_selection && calendar::is_same_day(calendar, *date, tapped) =>
        {
            SelectionValue::Empty
        }
        _ => SelectionValue::SingleDate { date: tapped },
    }
}

fn next_range<C: Calendar + ?Sized>(
    calendar: &C,
    settings: &SelectionSettings,
    current: &SelectionValue,
    tapped: Date,
) -> SelectionValue {
    let (from, to) = match *current {
        SelectionValue::DateRange { from, to } => (from, to),
        _ => return SelectionValue::day_range(calendar, tapped),
    };

    let on_from = calendar::is_same_day(calendar, tapped, from);
    let on_to = calendar::is_same_day(calendar, tapped, to);
    let degenerate = calendar::is_same_day(calendar, from, to);

    if settings.allow_nil_selection && on_from && on_to {
        return SelectionValue::Empty;
    }

    if !settings.allow_range_edits && !degenerate {
        return SelectionValue::day_range(calendar, tapped);
    }

    if on_from {
        SelectionValue::DateRange {
            from,
            to: calendar::end_of_day(calendar, tapped),
        }
    } else if on_to {
        SelectionValue::DateRange {
            from: calendar::start_of_day(calendar, tapped),
            to,
        }
    } else if tapped < from {
        SelectionValue::DateRange {
            from: calendar::start_of_day(calendar, tapped),
            to,
        }
    } else {
        SelectionValue::DateRange {
            from,
            to: calendar::end_of_day(calendar, tapped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ZonedCalendar;
    use chrono::{TimeZone, Utc};

    fn jan(d: u32) -> Date {
        Utc.with_ymd_and_hms(2025, 1, d, 12, 0, 0).unwrap()
    }

    fn start(d: u32) -> Date {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    fn end(d: u32) -> Date {
        Utc.with_ymd_and_hms(2025, 1, d, 23, 59, 59).unwrap()
    }

    fn range(from: u32, to: u32) -> SelectionValue {
        SelectionValue::DateRange {
            from: start(from),
            to: end(to),
        }
    }

    fn tap(settings: SelectionSettings, current: SelectionValue, d: u32) -> SelectionValue {
        next_selection(&ZonedCalendar::utc(), &settings, &current, jan(d))
    }

    #[test]
    fn single_tap_selects_date() {
        let next = tap(SelectionSettings::single(), SelectionValue::Empty, 4);
        assert_eq!(next, SelectionValue::SingleDate { date: jan(4) });
    }

    #[test]
    fn single_retap_is_stable_without_nil_selection() {
        let settings = SelectionSettings::single();
        let once = tap(settings, SelectionValue::Empty, 4);
        let twice = tap(settings, once, 4);

        assert_eq!(once, twice);
    }

    #[test]
    fn single_retap_clears_with_nil_selection() {
        let settings = SelectionSettings::single().with_nil_selection(true);
        let current = SelectionValue::SingleDate {
            date: Utc.with_ymd_and_hms(2025, 1, 4, 7, 0, 0).unwrap(),
        };

        assert_eq!(tap(settings, current, 4), SelectionValue::Empty);
        assert_eq!(
            tap(settings, current, 5),
            SelectionValue::SingleDate { date: jan(5) }
        );
    }

    #[test]
    fn range_first_tap_starts_one_day_range() {
        assert_eq!(tap(SelectionSettings::range(), SelectionValue::Empty, 7), range(7, 7));
    }

    #[test]
    fn range_replaces_a_stray_single_date() {
        let current = SelectionValue::SingleDate { date: jan(2) };
        assert_eq!(tap(SelectionSettings::range(), current, 7), range(7, 7));
    }

    #[test]
    fn range_extends_forward_and_backward() {
        let settings = SelectionSettings::range();

        assert_eq!(tap(settings, range(5, 5), 10), range(5, 10));
        assert_eq!(tap(settings, range(5, 5), 1), range(1, 5));
        assert_eq!(tap(settings, range(5, 10), 15), range(5, 15));
        assert_eq!(tap(settings, range(5, 10), 2), range(2, 10));
    }

    #[test]
    fn range_tap_inside_moves_right_edge() {
        assert_eq!(tap(SelectionSettings::range(), range(1, 10), 6), range(1, 6));
    }

    #[test]
    fn range_endpoint_tap_collapses_onto_endpoint() {
        let settings = SelectionSettings::range();

        assert_eq!(tap(settings, range(1, 10), 1), range(1, 1));
        assert_eq!(tap(settings, range(1, 10), 10), range(10, 10));
    }

    #[test]
    fn locked_range_restarts_on_tap() {
        let settings = SelectionSettings::range().with_range_edits(false);

        assert_eq!(tap(settings, range(1, 10), 15), range(15, 15));
        assert_eq!(tap(settings, range(1, 10), 1), range(1, 1));
        // a one-day range can still grow
        assert_eq!(tap(settings, range(3, 3), 8), range(3, 8));
    }

    #[test]
    fn degenerate_retap_clears_with_nil_selection() {
        let settings = SelectionSettings::range().with_nil_selection(true);

        assert_eq!(tap(settings, range(5, 5), 5), SelectionValue::Empty);
        assert_eq!(tap(settings, range(5, 9), 5), range(5, 5));
    }

    #[test]
    fn degenerate_retap_is_stable_without_nil_selection() {
        assert_eq!(tap(SelectionSettings::range(), range(5, 5), 5), range(5, 5));
    }

    #[test]
    fn ranges_stay_ordered_and_day_aligned() {
        let cal = ZonedCalendar::utc();
        let settings = SelectionSettings::range();
        let mut current = SelectionValue::Empty;

        for d in [12, 3, 27, 3, 19, 19, 1, 31, 8] {
            current = next_selection(&cal, &settings, &current, jan(d));
            match current {
                SelectionValue::DateRange { from, to } => {
                    assert!(from <= to);
                    assert_eq!(from, calendar::start_of_day(&cal, from));
                    assert_eq!(to, calendar::end_of_day(&cal, to));
                }
                other => panic!("Expected DateRange, got {:?}", other),
            }
        }
    }
}
