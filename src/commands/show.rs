use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use datepick_core::calendar::{self, Calendar};
use datepick_core::cell::{CellMembership, CellViewState};
use datepick_core::config::PickerConfig;
use datepick_core::{PickerEvent, SelectionValue, TapOutcome};
use log::debug;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::{calendar_for, parse_selection};
use crate::render::{render_month, render_selection};

pub struct ShowArgs {
    pub month: Option<String>,
    pub today: Option<NaiveDate>,
    pub select: Option<String>,
    pub shortcut: Option<String>,
    pub taps: Vec<NaiveDate>,
    pub json: bool,
}

#[derive(Serialize)]
struct CellReport {
    date: NaiveDate,
    membership: CellMembership,
    #[serde(flatten)]
    state: CellViewState,
}

#[derive(Serialize)]
struct MonthReport {
    month: String,
    selection: SelectionValue,
    active_shortcuts: Vec<String>,
    cells: Vec<CellReport>,
}

pub fn run(config: &PickerConfig, args: ShowArgs) -> Result<()> {
    let calendar = calendar_for(config, args.today)?;
    let mut session = config
        .session(calendar.clone())?
        .observer(|event| match event {
            PickerEvent::SelectionChanged(value) => debug!("event=selection_changed value={}", value),
            PickerEvent::Committed(value) => debug!("event=selection_committed value={}", value),
            PickerEvent::Cancelled => debug!("event=selection_cancelled"),
        })
        .build();

    let mut notes = Vec::new();

    if let Some(spec) = &args.select {
        let value = parse_selection(&calendar, spec)?;
        if let Err(e) = session.select(value) {
            notes.push(format!("Ignored --select {}: {}", spec, e));
        }
    }

    if let Some(name) = &args.shortcut {
        if let Err(e) = session.apply_shortcut(name) {
            notes.push(format!("Ignored --shortcut {}: {}", name, e));
        }
    }

    for day in &args.taps {
        let outcome = session.tap(calendar::day_start(&calendar, *day));
        if outcome == TapOutcome::Ignored {
            notes.push(format!("Ignored tap on {} (disabled)", day));
        }
    }

    let month = match &args.month {
        Some(m) => parse_month(m)?,
        None => default_month(session.selection(), &calendar),
    };
    let grid = session.month_grid(month);

    if args.json {
        let cells = grid
            .cells
            .iter()
            .map(|cell| CellReport {
                date: cell.day,
                membership: cell.membership,
                state: session.cell_state(cell.date, cell.membership).clone(),
            })
            .collect();
        let report = MonthReport {
            month: grid.month.format("%Y-%m").to_string(),
            selection: *session.selection(),
            active_shortcuts: session.active_shortcuts().iter().map(|s| s.to_string()).collect(),
            cells,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in render_month(&mut session, &grid, &config.styles) {
            println!("{}", line);
        }
        println!();
        println!("Selection: {}", render_selection(session.selection(), &calendar));

        let active = session.active_shortcuts();
        if !active.is_empty() {
            println!("Shortcuts: {}", active.join(", ").green());
        }
    }

    for note in &notes {
        eprintln!("{}", note.yellow());
    }

    session.commit();
    Ok(())
}

/// Parse `YYYY-MM` into the first day of that month.
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}

/// The month holding the start of the selection, or the current month.
fn default_month(selection: &SelectionValue, calendar: &impl Calendar) -> NaiveDate {
    let anchor = match *selection {
        SelectionValue::Empty => calendar.today(),
        SelectionValue::SingleDate { date } => calendar::local_date(calendar, date),
        SelectionValue::DateRange { from, .. } => calendar::local_date(calendar, from),
    };
    anchor.with_day(1).unwrap_or(anchor)
}
