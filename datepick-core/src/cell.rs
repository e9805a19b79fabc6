//! Per-cell visual state derived from the selection.

use chrono::{Datelike, Days};
use serde::{Deserialize, Serialize};

use crate::bounds::{self, AvailabilityFilter, DateBounds};
use crate::calendar::{self, Calendar, Date};
use crate::selection::SelectionValue;

/// Which month a grid cell belongs to, relative to the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMembership {
    Current,
    PreviousOutOfBoundary,
    PreviousWithinBoundary,
    NextOutOfBoundary,
    NextWithinBoundary,
}

impl CellMembership {
    pub fn is_current(&self) -> bool {
        matches!(self, CellMembership::Current)
    }
}

/// A date's role relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeEndpointPosition {
    None,
    /// Single selected date, or a one-day range.
    Full,
    Left,
    Right,
    Middle,
}

/// Rendering of one edge of a cell's range band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSideState {
    #[default]
    Hidden,
    Squared,
    Rounded,
}

/// Everything the rendering layer needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellViewState {
    pub label_text: Option<String>,
    pub enabled: bool,
    pub is_today: bool,
    pub selected_highlight_visible: bool,
    pub left_side: RangeSideState,
    pub right_side: RangeSideState,
}

impl CellViewState {
    fn filler(left_side: RangeSideState, right_side: RangeSideState) -> Self {
        CellViewState {
            label_text: None,
            enabled: false,
            is_today: false,
            selected_highlight_visible: false,
            left_side,
            right_side,
        }
    }
}

/// Inputs shared by every cell of a grid.
pub struct CellContext<'a, C: Calendar + ?Sized> {
    pub calendar: &'a C,
    pub selection: &'a SelectionValue,
    pub bounds: &'a DateBounds,
    pub availability: &'a AvailabilityFilter,
}

impl<C: Calendar + ?Sized> CellContext<'_, C> {
    /// Derive the state of the cell showing `date`.
    pub fn resolve(&self, date: Date, membership: CellMembership) -> CellViewState {
        resolve_cell(
            self.calendar,
            date,
            membership,
            self.selection,
            self.bounds,
            self.availability,
        )
    }
}

/// Derive the state of the cell showing `date`.
pub fn resolve_cell<C: Calendar + ?Sized>(
    calendar: &C,
    date: Date,
    membership: CellMembership,
    selection: &SelectionValue,
    bounds: &DateBounds,
    availability: &AvailabilityFilter,
) -> CellViewState {
    if !membership.is_current() {
        return resolve_filler(calendar, date, membership, selection);
    }

    let enabled = bounds::is_date_enabled(calendar, bounds, availability, date);
    let position = endpoint_position(calendar, date, selection);
    let (left_side, right_side) = band_sides(calendar, date, position);

    CellViewState {
        label_text: Some(calendar::local_date(calendar, date).day().to_string()),
        enabled,
        is_today: calendar.is_today(date),
        selected_highlight_visible: matches!(
            position,
            RangeEndpointPosition::Full | RangeEndpointPosition::Left | RangeEndpointPosition::Right
        ),
        left_side,
        right_side,
    }
}

/// Adjacent-month filler cells carry no label and only show the band when
/// the selected range crosses into or out of their month.
fn resolve_filler<C: Calendar + ?Sized>(
    calendar: &C,
    date: Date,
    membership: CellMembership,
    selection: &SelectionValue,
) -> CellViewState {
    let (from, to) = match *selection {
        SelectionValue::DateRange { from, to } => (from, to),
        _ => return CellViewState::filler(RangeSideState::Hidden, RangeSideState::Hidden),
    };

    let cell_month = calendar::local_date(calendar, date);
    let continues = match membership {
        CellMembership::NextWithinBoundary => {
            let previous_month = calendar::first_of_month(cell_month).pred_opt();
            match previous_month {
                Some(prev) => {
                    from < calendar::day_end(calendar, calendar::last_of_month(prev))
                        && to > calendar::day_start(calendar, calendar::first_of_month(cell_month))
                }
                None => false,
            }
        }
        CellMembership::PreviousWithinBoundary => {
            let next_month = calendar::last_of_month(cell_month).checked_add_days(Days::new(1));
            match next_month {
                Some(next) => {
                    from < calendar::day_end(calendar, calendar::last_of_month(cell_month))
                        && to > calendar::day_start(calendar, next)
                }
                None => false,
            }
        }
        _ => false,
    };

    if !continues {
        return CellViewState::filler(RangeSideState::Hidden, RangeSideState::Hidden);
    }

    let weekday = calendar::weekday(calendar, date);
    let left = if weekday == calendar.first_weekday() {
        RangeSideState::Rounded
    } else {
        RangeSideState::Squared
    };
    let right = if weekday == calendar.last_weekday() {
        RangeSideState::Rounded
    } else {
        RangeSideState::Squared
    };
    CellViewState::filler(left, right)
}

/// Role of `date` within the selection.
pub fn endpoint_position<C: Calendar + ?Sized>(
    calendar: &C,
    date: Date,
    selection: &SelectionValue,
) -> RangeEndpointPosition {
    match *selection {
        SelectionValue::Empty => RangeEndpointPosition::None,
        SelectionValue::SingleDate { date: selected } => {
            if calendar::is_same_day(calendar, date, selected) {
                RangeEndpointPosition::Full
            } else {
                RangeEndpointPosition::None
            }
        }
        SelectionValue::DateRange { from, to } => {
            let on_from = calendar::is_same_day(calendar, date, from);
            let on_to = calendar::is_same_day(calendar, date, to);

            if !on_from && !on_to && (date < from || date > to) {
                RangeEndpointPosition::None
            } else if on_from && on_to {
                RangeEndpointPosition::Full
            } else if on_from {
                RangeEndpointPosition::Left
            } else if on_to {
                RangeEndpointPosition::Right
            } else {
                RangeEndpointPosition::Middle
            }
        }
    }
}

/// Left and right band edges for a current-month cell.
///
/// Rules are tried in order and the first match wins, so an endpoint on a
/// week edge only rounds the side facing into the range.
pub fn band_sides<C: Calendar + ?Sized>(
    calendar: &C,
    date: Date,
    position: RangeEndpointPosition,
) -> (RangeSideState, RangeSideState) {
    use RangeEndpointPosition as P;
    use RangeSideState::{Hidden, Rounded, Squared};

    if position == P::None {
        return (Hidden, Hidden);
    }

    let weekday = calendar::weekday(calendar, date);
    let week_start = weekday == calendar.first_weekday();
    let week_end = weekday == calendar.last_weekday();

    match position {
        P::Right if week_start => (Rounded, Hidden),
        P::Left if week_end => (Hidden, Rounded),
        P::Left => (Hidden, Squared),
        P::Right => (Squared, Hidden),
        _ if week_start => (Rounded, Squared),
        _ if week_end => (Squared, Rounded),
        P::Full => (Hidden, Hidden),
        _ => (Squared, Squared),
    }
}
