//! Memoized cell states.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;

use crate::cell::{CellMembership, CellViewState};

/// Cell states keyed by grid position. Entries are never patched; any change
/// to the selection or the enablement configuration clears the whole cache.
#[derive(Debug, Default)]
pub struct CellStateCache {
    entries: HashMap<(NaiveDate, CellMembership), CellViewState>,
}

impl CellStateCache {
    pub fn new() -> Self {
        CellStateCache::default()
    }

    pub fn get_or_compute<F>(
        &mut self,
        day: NaiveDate,
        membership: CellMembership,
        compute: F,
    ) -> &CellViewState
    where
        F: FnOnce() -> CellViewState,
    {
        self.entries.entry((day, membership)).or_insert_with(compute)
    }

    pub fn invalidate_all(&mut self) {
        if !self.entries.is_empty() {
            debug!("event=cell_cache_invalidated entries={}", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::RangeSideState;

    fn state(label: &str) -> CellViewState {
        CellViewState {
            label_text: Some(label.to_string()),
            enabled: true,
            is_today: false,
            selected_highlight_visible: false,
            left_side: RangeSideState::Hidden,
            right_side: RangeSideState::Hidden,
        }
    }

    #[test]
    fn computes_once_per_key() {
        let mut cache = CellStateCache::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut calls = 0;

        cache.get_or_compute(day, CellMembership::Current, || {
            calls += 1;
            state("1")
        });
        let cached = cache
            .get_or_compute(day, CellMembership::Current, || {
                calls += 1;
                state("changed")
            })
            .clone();

        assert_eq!(calls, 1);
        assert_eq!(cached.label_text.as_deref(), Some("1"));
    }

    #[test]
    fn membership_is_part_of_the_key() {
        let mut cache = CellStateCache::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        cache.get_or_compute(day, CellMembership::Current, || state("31"));
        cache.get_or_compute(day, CellMembership::PreviousWithinBoundary, || state("filler"));

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_all_clears_everything() {
        let mut cache = CellStateCache::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        cache.get_or_compute(day, CellMembership::Current, || state("1"));

        cache.invalidate_all();

        assert!(cache.is_empty());
        let fresh = cache.get_or_compute(day, CellMembership::Current, || state("fresh"));
        assert_eq!(fresh.label_text.as_deref(), Some("fresh"));
    }
}
