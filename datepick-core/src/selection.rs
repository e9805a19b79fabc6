//! Selection values and their normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::{self, Calendar, Date};

/// Whether a picker selects one date or a range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Single => write!(f, "single"),
            SelectionMode::Range => write!(f, "range"),
        }
    }
}

/// The picker's current selection.
///
/// A `DateRange` always has `from <= to`, with `from` at the start of its
/// day and `to` at the end of its day. A range covering a single day is a
/// valid one-day selection, distinct from `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionValue {
    #[default]
    Empty,
    SingleDate { date: Date },
    DateRange { from: Date, to: Date },
}

impl SelectionValue {
    /// A range from the start of `from`'s day to the end of `to`'s day,
    /// swapping the endpoints if they arrive inverted.
    pub fn range<C: Calendar + ?Sized>(calendar: &C, from: Date, to: Date) -> Self {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        SelectionValue::DateRange {
            from: calendar::start_of_day(calendar, from),
            to: calendar::end_of_day(calendar, to),
        }
    }

    /// The one-day range covering `date`.
    pub fn day_range<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Self {
        Self::range(calendar, date, date)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionValue::Empty)
    }

    /// True for a range whose endpoints fall on the same day.
    pub fn is_degenerate<C: Calendar + ?Sized>(&self, calendar: &C) -> bool {
        match self {
            SelectionValue::DateRange { from, to } => calendar::is_same_day(calendar, *from, *to),
            _ => false,
        }
    }

    /// Re-establish the range invariants (ordering and day boundaries).
    pub fn normalized<C: Calendar + ?Sized>(self, calendar: &C) -> Self {
        match self {
            SelectionValue::DateRange { from, to } => Self::range(calendar, from, to),
            other => other,
        }
    }

    /// Coerce the value into the shape a picker of `mode` produces.
    ///
    /// A range handed to a single-date picker keeps its start date; a single
    /// date handed to a range picker becomes a one-day range.
    pub fn conformed<C: Calendar + ?Sized>(self, calendar: &C, mode: SelectionMode) -> Self {
        match (mode, self) {
            (_, SelectionValue::Empty) => SelectionValue::Empty,
            (SelectionMode::Single, SelectionValue::DateRange { from, .. }) => {
                SelectionValue::SingleDate { date: from }
            }
            (SelectionMode::Single, single) => single,
            (SelectionMode::Range, SelectionValue::SingleDate { date }) => {
                Self::day_range(calendar, date)
            }
            (SelectionMode::Range, range) => range.normalized(calendar),
        }
    }

    /// Day-level equality: instants on the same calendar day compare equal.
    /// Values of different kinds never match, and `Empty` matches nothing.
    pub fn same_days<C: Calendar + ?Sized>(&self, other: &SelectionValue, calendar: &C) -> bool {
        match (self, other) {
            (SelectionValue::SingleDate { date: a }, SelectionValue::SingleDate { date: b }) => {
                calendar::is_same_day(calendar, *a, *b)
            }
            (
                SelectionValue::DateRange { from: a_from, to: a_to },
                SelectionValue::DateRange { from: b_from, to: b_to },
            ) => {
                calendar::is_same_day(calendar, *a_from, *b_from)
                    && calendar::is_same_day(calendar, *a_to, *b_to)
            }
            _ => false,
        }
    }
}

impl fmt::Display for SelectionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionValue::Empty => write!(f, "(none)"),
            SelectionValue::SingleDate { date } => write!(f, "{}", date.to_rfc3339()),
            SelectionValue::DateRange { from, to } => {
                write!(f, "{} .. {}", from.to_rfc3339(), to.to_rfc3339())
            }
        }
    }
}
