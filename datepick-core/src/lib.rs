//! Selection engine for date and date-range pickers.
//!
//! This crate holds the logic behind a picker widget, independent of any
//! rendering toolkit:
//! - `transition` turns taps into the next selection
//! - `cell` derives the visual state of each calendar cell
//! - `shortcut` matches named presets against the selection
//! - `session` ties them together around one owned selection

pub mod bounds;
pub mod cache;
pub mod calendar;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod selection;
pub mod session;
pub mod shortcut;
pub mod style;
pub mod transition;

pub use bounds::{AvailabilityFilter, DateBounds};
pub use calendar::{Calendar, Date, ZonedCalendar};
pub use cell::{CellMembership, CellViewState, RangeEndpointPosition, RangeSideState};
pub use error::{PickerError, PickerResult};
pub use selection::{SelectionMode, SelectionValue};
pub use session::{PickerEvent, PickerSession, TapOutcome};
