//! Date bounds and availability filtering.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::warn;

use crate::calendar::{self, Calendar, Date};

/// Optional inclusive limits on selectable dates.
/// `minimum` sits at the start of its day and `maximum` at the end of its day,
/// with `minimum <= maximum`. Only [`DateBounds::new`] and
/// [`DateBounds::from_days`] build bounded values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    minimum: Option<Date>,
    maximum: Option<Date>,
}

impl DateBounds {
    pub fn unbounded() -> Self {
        DateBounds::default()
    }

    /// Normalize both limits to day boundaries, swapping them if inverted.
    pub fn new<C: Calendar + ?Sized>(
        calendar: &C,
        minimum: Option<Date>,
        maximum: Option<Date>,
    ) -> Self {
        let (minimum, maximum) = match (minimum, maximum) {
            (Some(min), Some(max)) if min > max => {
                warn!(
                    "event=bounds_swapped minimum={} maximum={}",
                    min.to_rfc3339(),
                    max.to_rfc3339()
                );
                (Some(max), Some(min))
            }
            other => other,
        };

        DateBounds {
            minimum: minimum.map(|d| calendar::start_of_day(calendar, d)),
            maximum: maximum.map(|d| calendar::end_of_day(calendar, d)),
        }
    }

    /// Bounds from calendar days (inclusive).
    pub fn from_days<C: Calendar + ?Sized>(
        calendar: &C,
        minimum: Option<NaiveDate>,
        maximum: Option<NaiveDate>,
    ) -> Self {
        Self::new(
            calendar,
            minimum.map(|d| calendar::day_start(calendar, d)),
            maximum.map(|d| calendar::day_end(calendar, d)),
        )
    }

    pub fn minimum(&self) -> Option<Date> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<Date> {
        self.maximum
    }

    pub fn contains(&self, date: Date) -> bool {
        self.minimum.is_none_or(|min| date >= min) && self.maximum.is_none_or(|max| date <= max)
    }
}

/// Restricts selection to an explicit set of days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityFilter {
    pub only_available_dates: bool,
    pub available_days: BTreeSet<NaiveDate>,
}

impl AvailabilityFilter {
    pub fn allow_all() -> Self {
        AvailabilityFilter::default()
    }

    pub fn only<I: IntoIterator<Item = NaiveDate>>(days: I) -> Self {
        AvailabilityFilter {
            only_available_dates: true,
            available_days: days.into_iter().collect(),
        }
    }

    pub fn allows<C: Calendar + ?Sized>(&self, calendar: &C, date: Date) -> bool {
        if !self.only_available_dates {
            return true;
        }
        // An empty set with the filter on enables nothing.
        self.available_days
            .contains(&calendar::local_date(calendar, date))
    }
}

/// Whether a current-month day can be tapped.
pub fn is_date_enabled<C: Calendar + ?Sized>(
    calendar: &C,
    bounds: &DateBounds,
    filter: &AvailabilityFilter,
    date: Date,
) -> bool {
    bounds.contains(date) && filter.allows(calendar, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ZonedCalendar;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let cal = ZonedCalendar::utc();
        let bounds = DateBounds::from_days(&cal, Some(day(20)), Some(day(10)));

        assert_eq!(bounds.minimum(), Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()));
        assert_eq!(
            bounds.maximum(),
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn inverted_instants_are_swapped_and_snapped() {
        let cal = ZonedCalendar::utc();
        let bounds = DateBounds::new(
            &cal,
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 8, 30, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 17, 0, 0).unwrap()),
        );

        assert_eq!(bounds.minimum(), Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()));
        assert_eq!(
            bounds.maximum(),
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn bounds_are_inclusive_at_day_level() {
        let cal = ZonedCalendar::utc();
        let bounds = DateBounds::from_days(&cal, Some(day(10)), Some(day(20)));

        assert!(bounds.contains(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()));
        assert!(bounds.contains(Utc.with_ymd_and_hms(2025, 1, 20, 18, 0, 0).unwrap()));
        assert!(!bounds.contains(Utc.with_ymd_and_hms(2025, 1, 9, 23, 0, 0).unwrap()));
        assert!(!bounds.contains(Utc.with_ymd_and_hms(2025, 1, 21, 0, 0, 0).unwrap()));
        assert!(DateBounds::unbounded().contains(Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn empty_availability_disables_everything() {
        let cal = ZonedCalendar::utc();
        let filter = AvailabilityFilter::only(Vec::new());
        let date = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();

        assert!(!filter.allows(&cal, date));
        assert!(!is_date_enabled(&cal, &DateBounds::unbounded(), &filter, date));
    }

    #[test]
    fn availability_matches_whole_days() {
        let cal = ZonedCalendar::utc();
        let filter = AvailabilityFilter::only([day(5), day(7)]);

        assert!(filter.allows(&cal, Utc.with_ymd_and_hms(2025, 1, 5, 23, 0, 0).unwrap()));
        assert!(!filter.allows(&cal, Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap()));
        assert!(AvailabilityFilter::allow_all().allows(&cal, Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap()));
    }
}
