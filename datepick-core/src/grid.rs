//! Month pages: the 6x7 grid of cells for one displayed month.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::bounds::DateBounds;
use crate::calendar::{self, Calendar, Date};
use crate::cell::CellMembership;

pub const GRID_ROWS: usize = 6;
pub const GRID_COLUMNS: usize = 7;

/// Range of months the picker can scroll through. `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthSpan {
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
}

impl MonthSpan {
    pub fn from_bounds<C: Calendar + ?Sized>(calendar: &C, bounds: &DateBounds) -> Self {
        let month_of = |d: Date| calendar::first_of_month(calendar::local_date(calendar, d));
        MonthSpan {
            first: bounds.minimum().map(month_of),
            last: bounds.maximum().map(month_of),
        }
    }

    pub fn contains(&self, month: NaiveDate) -> bool {
        let month = calendar::first_of_month(month);
        self.first.is_none_or(|first| month >= first) && self.last.is_none_or(|last| month <= last)
    }
}

/// One cell of a month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub day: NaiveDate,
    /// Start of `day` in the calendar's timezone.
    pub date: Date,
    pub membership: CellMembership,
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Lay out the page for the month containing `month`. The first column is
    /// the calendar's first weekday; leading and trailing cells come from the
    /// adjacent months.
    pub fn build<C: Calendar + ?Sized>(calendar: &C, month: NaiveDate, span: &MonthSpan) -> Self {
        let month = calendar::first_of_month(month);
        let leading = days_from(calendar.first_weekday(), month.weekday());
        let grid_start = month.checked_sub_days(Days::new(leading)).unwrap_or(month);

        let previous = month.checked_sub_months(Months::new(1));
        let next = month.checked_add_months(Months::new(1));
        let previous_membership = match previous {
            Some(m) if span.contains(m) => CellMembership::PreviousWithinBoundary,
            _ => CellMembership::PreviousOutOfBoundary,
        };
        let next_membership = match next {
            Some(m) if span.contains(m) => CellMembership::NextWithinBoundary,
            _ => CellMembership::NextOutOfBoundary,
        };

        let cells = grid_start
            .iter_days()
            .take(GRID_ROWS * GRID_COLUMNS)
            .map(|day| {
                let membership = if day < month {
                    previous_membership
                } else if day.month() == month.month() && day.year() == month.year() {
                    CellMembership::Current
                } else {
                    next_membership
                };
                GridCell {
                    day,
                    date: calendar::day_start(calendar, day),
                    membership,
                }
            })
            .collect();

        MonthGrid { month, cells }
    }

    /// Cells grouped by week.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    /// The seven weekdays in display order.
    pub fn weekday_header<C: Calendar + ?Sized>(calendar: &C) -> [Weekday; 7] {
        let first = calendar.first_weekday();
        std::array::from_fn(|i| (0..i).fold(first, |day, _| day.succ()))
    }
}

/// Days to step back from `weekday` to reach `week_start`.
fn days_from(week_start: Weekday, weekday: Weekday) -> u64 {
    u64::from((weekday.num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7)
}
