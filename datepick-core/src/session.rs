//! A picker session: owns the selection and applies taps and programmatic
//! selections to it.

use log::{debug, warn};

use crate::bounds::{self, AvailabilityFilter, DateBounds};
use crate::cache::CellStateCache;
use crate::calendar::{self, Date, ZonedCalendar};
use crate::cell::{self, CellMembership, CellViewState};
use crate::error::{PickerError, PickerResult};
use crate::grid::{MonthGrid, MonthSpan};
use crate::selection::SelectionValue;
use crate::shortcut::Shortcut;
use crate::transition::{self, SelectionSettings};

/// Notifications delivered to session observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    SelectionChanged(SelectionValue),
    Committed(SelectionValue),
    Cancelled,
}

/// Result of forwarding a tap to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Applied,
    /// The tapped day is disabled; the selection is unchanged.
    Ignored,
}

type Observer = Box<dyn FnMut(&PickerEvent)>;

pub struct PickerSession {
    calendar: ZonedCalendar,
    settings: SelectionSettings,
    bounds: DateBounds,
    availability: AvailabilityFilter,
    selection: SelectionValue,
    shortcuts: Vec<Shortcut>,
    cache: CellStateCache,
    observers: Vec<Observer>,
}

impl PickerSession {
    pub fn builder(calendar: ZonedCalendar, settings: SelectionSettings) -> PickerSessionBuilder {
        PickerSessionBuilder {
            calendar,
            settings,
            bounds: DateBounds::unbounded(),
            availability: AvailabilityFilter::allow_all(),
            initial: SelectionValue::Empty,
            shortcuts: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn calendar(&self) -> &ZonedCalendar {
        &self.calendar
    }

    pub fn settings(&self) -> &SelectionSettings {
        &self.settings
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn availability(&self) -> &AvailabilityFilter {
        &self.availability
    }

    pub fn selection(&self) -> &SelectionValue {
        &self.selection
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn is_enabled(&self, date: Date) -> bool {
        bounds::is_date_enabled(&self.calendar, &self.bounds, &self.availability, date)
    }

    /// Apply a tap on `date`. Taps on disabled days leave the selection alone.
    pub fn tap(&mut self, date: Date) -> TapOutcome {
        if !self.is_enabled(date) {
            debug!("event=tap_ignored date={}", date.to_rfc3339());
            return TapOutcome::Ignored;
        }

        let next =
            transition::next_selection(&self.calendar, &self.settings, &self.selection, date);
        self.replace_selection(next);
        TapOutcome::Applied
    }

    /// Replace the selection programmatically. The value is conformed to the
    /// picker's mode and must lie within the bounds and availability filter.
    pub fn select(&mut self, value: SelectionValue) -> PickerResult<()> {
        let value = value.conformed(&self.calendar, self.settings.mode);
        if let Err(e) = self.validate(&value) {
            warn!("event=selection_rejected value={} reason=\"{}\"", value, e);
            return Err(e);
        }
        self.replace_selection(value);
        Ok(())
    }

    /// Apply the configured shortcut called `name`.
    pub fn apply_shortcut(&mut self, name: &str) -> PickerResult<()> {
        let value = self
            .shortcuts
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.generate(&self.calendar))
            .ok_or_else(|| PickerError::UnknownShortcut(name.to_string()))?;
        self.select(value)
    }

    /// Names of the shortcuts equal to the current selection.
    pub fn active_shortcuts(&self) -> Vec<&str> {
        self.shortcuts
            .iter()
            .filter(|s| s.is_active(&self.calendar, &self.selection))
            .map(|s| s.name())
            .collect()
    }

    pub fn set_bounds(&mut self, bounds: DateBounds) {
        self.bounds = bounds;
        self.cache.invalidate_all();
    }

    pub fn set_availability(&mut self, availability: AvailabilityFilter) {
        self.availability = availability;
        self.cache.invalidate_all();
    }

    /// State of the cell showing `date`, memoized until the next change.
    pub fn cell_state(&mut self, date: Date, membership: CellMembership) -> &CellViewState {
        let context = cell::CellContext {
            calendar: &self.calendar,
            selection: &self.selection,
            bounds: &self.bounds,
            availability: &self.availability,
        };
        let day = calendar::local_date(&self.calendar, date);
        self.cache
            .get_or_compute(day, membership, || context.resolve(date, membership))
    }

    pub fn month_span(&self) -> MonthSpan {
        MonthSpan::from_bounds(&self.calendar, &self.bounds)
    }

    /// Lay out the page for the month containing `month`.
    pub fn month_grid(&self, month: chrono::NaiveDate) -> MonthGrid {
        MonthGrid::build(&self.calendar, month, &self.month_span())
    }

    /// Finish the session with the current selection.
    pub fn commit(mut self) -> SelectionValue {
        let value = self.selection;
        self.notify(&PickerEvent::Committed(value));
        value
    }

    /// Finish the session without a selection.
    pub fn cancel(mut self) {
        self.notify(&PickerEvent::Cancelled);
    }

    fn validate(&self, value: &SelectionValue) -> PickerResult<()> {
        let endpoints = match *value {
            SelectionValue::Empty => return Ok(()),
            SelectionValue::SingleDate { date } => [date, date],
            SelectionValue::DateRange { from, to } => [from, to],
        };

        if !endpoints.iter().all(|d| self.bounds.contains(*d)) {
            return Err(PickerError::OutOfBounds(value.to_string()));
        }
        if !endpoints
            .iter()
            .all(|d| self.availability.allows(&self.calendar, *d))
        {
            return Err(PickerError::Unavailable(value.to_string()));
        }
        Ok(())
    }

    fn replace_selection(&mut self, value: SelectionValue) {
        self.selection = value;
        self.cache.invalidate_all();
        self.notify(&PickerEvent::SelectionChanged(value));
    }

    fn notify(&mut self, event: &PickerEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

pub struct PickerSessionBuilder {
    calendar: ZonedCalendar,
    settings: SelectionSettings,
    bounds: DateBounds,
    availability: AvailabilityFilter,
    initial: SelectionValue,
    shortcuts: Vec<Shortcut>,
    observers: Vec<Observer>,
}

impl PickerSessionBuilder {
    pub fn bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn availability(mut self, availability: AvailabilityFilter) -> Self {
        self.availability = availability;
        self
    }

    pub fn initial(mut self, value: SelectionValue) -> Self {
        self.initial = value;
        self
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    pub fn shortcuts(mut self, shortcuts: impl IntoIterator<Item = Shortcut>) -> Self {
        self.shortcuts.extend(shortcuts);
        self
    }

    /// Register a handler for selection changes and the final commit/cancel.
    pub fn observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&PickerEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the session. An initial selection outside the bounds or
    /// availability is dropped.
    pub fn build(self) -> PickerSession {
        let mut session = PickerSession {
            calendar: self.calendar,
            settings: self.settings,
            bounds: self.bounds,
            availability: self.availability,
            selection: SelectionValue::Empty,
            shortcuts: self.shortcuts,
            cache: CellStateCache::new(),
            observers: self.observers,
        };

        let initial = self.initial.conformed(&session.calendar, session.settings.mode);
        match session.validate(&initial) {
            Ok(()) => session.selection = initial,
            Err(e) => warn!("event=initial_selection_dropped reason=\"{}\"", e),
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::RangeSideState;
    use crate::selection::SelectionMode;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cal() -> ZonedCalendar {
        ZonedCalendar::utc().with_today(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn at(d: u32) -> Date {
        Utc.with_ymd_and_hms(2025, 1, d, 12, 0, 0).unwrap()
    }

    fn bounded_range_session() -> PickerSession {
        let c = cal();
        let bounds = DateBounds::from_days(&c, Some(day(5)), Some(day(25)));
        PickerSession::builder(c, SelectionSettings::range())
            .bounds(bounds)
            .build()
    }

    #[test]
    fn taps_build_a_range() {
        let mut session = bounded_range_session();

        assert_eq!(session.tap(at(8)), TapOutcome::Applied);
        assert_eq!(session.tap(at(12)), TapOutcome::Applied);
        assert_eq!(
            *session.selection(),
            SelectionValue::range(session.calendar(), at(8), at(12))
        );
    }

    #[test]
    fn disabled_tap_is_a_no_op() {
        let mut session = bounded_range_session();
        session.tap(at(8));
        let before = *session.selection();

        assert_eq!(session.tap(at(2)), TapOutcome::Ignored);
        assert_eq!(*session.selection(), before);
    }

    #[test]
    fn out_of_bounds_programmatic_selection_is_rejected() {
        let mut session = bounded_range_session();
        session.tap(at(8));
        let before = *session.selection();

        let outside = SelectionValue::range(session.calendar(), at(1), at(10));
        assert!(matches!(session.select(outside), Err(PickerError::OutOfBounds(_))));
        assert_eq!(*session.selection(), before);
    }

    #[test]
    fn unavailable_programmatic_selection_is_rejected() {
        let c = cal();
        let mut session = PickerSession::builder(c, SelectionSettings::single())
            .availability(AvailabilityFilter::only([day(3), day(4)]))
            .build();

        assert!(session.select(SelectionValue::SingleDate { date: at(3) }).is_ok());
        assert!(matches!(
            session.select(SelectionValue::SingleDate { date: at(5) }),
            Err(PickerError::Unavailable(_))
        ));
        assert_eq!(*session.selection(), SelectionValue::SingleDate { date: at(3) });
    }

    #[test]
    fn inverted_initial_range_is_normalized() {
        let c = cal();
        let inverted = SelectionValue::DateRange { from: at(20), to: at(10) };
        let session = PickerSession::builder(c.clone(), SelectionSettings::range())
            .initial(inverted)
            .build();

        assert_eq!(*session.selection(), SelectionValue::range(&c, at(10), at(20)));
    }

    #[test]
    fn initial_selection_outside_bounds_is_dropped() {
        let c = cal();
        let bounds = DateBounds::from_days(&c, Some(day(5)), Some(day(25)));
        let session = PickerSession::builder(c, SelectionSettings::single())
            .bounds(bounds)
            .initial(SelectionValue::SingleDate { date: at(28) })
            .build();

        assert!(session.selection().is_empty());
    }

    #[test]
    fn inverted_bounds_are_normalized_on_the_way_in() {
        let c = cal();
        let inverted = DateBounds::new(
            &c,
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 23, 59, 59).unwrap()),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()),
        );

        let mut session = PickerSession::builder(c.clone(), SelectionSettings::single())
            .bounds(inverted)
            .build();
        assert!(session.is_enabled(at(15)));
        assert!(!session.is_enabled(at(21)));

        session.set_bounds(DateBounds::new(&c, Some(at(25)), Some(at(12))));
        assert!(session.is_enabled(at(12)));
        assert!(session.is_enabled(at(25)));
        assert!(!session.is_enabled(at(11)));
    }

    #[test]
    fn range_availability_checks_endpoints_only() {
        let c = cal();
        let mut session = PickerSession::builder(c.clone(), SelectionSettings::range())
            .availability(AvailabilityFilter::only([day(10), day(14)]))
            .build();

        // Jan 11 to 13 are unavailable but sit inside the range.
        let value = SelectionValue::range(&c, at(10), at(14));
        assert!(session.select(value).is_ok());
        assert_eq!(*session.selection(), value);
        assert!(!session.is_enabled(at(12)));

        assert!(matches!(
            session.select(SelectionValue::range(&c, at(10), at(15))),
            Err(PickerError::Unavailable(_))
        ));
    }

    #[test]
    fn oversized_shortcut_cannot_be_built() {
        assert!(Shortcut::rolling("Forever", "1000000years", SelectionMode::Range).is_err());
        let session = PickerSession::builder(cal(), SelectionSettings::range())
            .shortcut(Shortcut::rolling("Decade", "3650days", SelectionMode::Range).unwrap())
            .build();

        assert!(session.active_shortcuts().is_empty());
    }

    #[test]
    fn cell_cache_refreshes_after_tap() {
        let mut session = bounded_range_session();
        session.tap(at(10));

        let first = session.cell_state(at(10), CellMembership::Current).clone();
        assert!(first.selected_highlight_visible);

        session.tap(at(14));
        let middle = session.cell_state(at(13), CellMembership::Current).clone();
        assert_eq!(middle.left_side, RangeSideState::Squared);
        assert_eq!(middle.right_side, RangeSideState::Squared);
        let left = session.cell_state(at(10), CellMembership::Current).clone();
        assert_eq!(left.right_side, RangeSideState::Squared);
    }

    #[test]
    fn cell_cache_refreshes_after_bounds_change() {
        let mut session = bounded_range_session();
        assert!(session.cell_state(at(20), CellMembership::Current).enabled);

        let c = session.calendar().clone();
        session.set_bounds(DateBounds::from_days(&c, Some(day(5)), Some(day(15))));
        assert!(!session.cell_state(at(20), CellMembership::Current).enabled);

        session.set_availability(AvailabilityFilter::only(Vec::new()));
        assert!(!session.cell_state(at(10), CellMembership::Current).enabled);
    }

    #[test]
    fn observers_see_changes_and_commit() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut session = PickerSession::builder(cal(), SelectionSettings::single())
            .observer(move |event| sink.borrow_mut().push(event.clone()))
            .build();

        session.tap(at(9));
        let committed = session.commit();

        let expected = SelectionValue::SingleDate { date: at(9) };
        assert_eq!(committed, expected);
        assert_eq!(
            *events.borrow(),
            vec![
                PickerEvent::SelectionChanged(expected),
                PickerEvent::Committed(expected)
            ]
        );
    }

    #[test]
    fn cancel_notifies_observers() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let session = PickerSession::builder(cal(), SelectionSettings::single())
            .observer(move |event| sink.borrow_mut().push(event.clone()))
            .build();

        session.cancel();

        assert_eq!(*events.borrow(), vec![PickerEvent::Cancelled]);
    }

    #[test]
    fn shortcuts_apply_and_highlight() {
        let mut session = PickerSession::builder(cal(), SelectionSettings::range())
            .shortcut(Shortcut::builtin("today", SelectionMode::Range).unwrap())
            .shortcut(Shortcut::builtin("last_week", SelectionMode::Range).unwrap())
            .build();

        session.apply_shortcut("Last week").unwrap();
        assert_eq!(session.active_shortcuts(), vec!["Last week"]);
        assert_eq!(*session.selection(), SelectionValue::range(session.calendar(), at(8), at(15)));

        session.tap(at(15));
        assert_eq!(session.active_shortcuts(), vec!["Today"]);

        assert!(matches!(
            session.apply_shortcut("Next decade"),
            Err(PickerError::UnknownShortcut(_))
        ));
    }

    #[test]
    fn shortcut_outside_bounds_is_ignored() {
        let c = cal();
        let bounds = DateBounds::from_days(&c, Some(day(10)), None);
        let mut session = PickerSession::builder(c, SelectionSettings::range())
            .bounds(bounds)
            .shortcut(Shortcut::builtin("last_week", SelectionMode::Range).unwrap())
            .build();

        assert!(session.apply_shortcut("Last week").is_err());
        assert!(session.selection().is_empty());
    }
}
