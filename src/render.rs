//! TUI rendering for picker types.
//!
//! Each cell is four columns wide: the left band edge, the right-aligned day
//! label, then the right band edge.

use chrono::Weekday;
use datepick_core::grid::MonthGrid;
use datepick_core::style::{CellStyle, Color, StyleSheet};
use datepick_core::{
    Calendar, CellViewState, Date, PickerSession, RangeSideState, SelectionValue, ZonedCalendar,
};
use owo_colors::{AnsiColors, OwoColorize};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Render a selection with dates shown in the calendar's timezone.
pub fn render_selection(value: &SelectionValue, calendar: &ZonedCalendar) -> String {
    let day = |d: &Date| d.with_timezone(&calendar.timezone()).format("%a %b %-d %Y").to_string();
    match value {
        SelectionValue::Empty => "(none)".dimmed().to_string(),
        SelectionValue::SingleDate { date } => day(date),
        SelectionValue::DateRange { from, to } => format!("{} → {}", day(from), day(to)),
    }
}

impl Render for Weekday {
    fn render(&self) -> String {
        let name = self.to_string();
        format!(" {:>2} ", &name[..2])
    }
}

fn ansi(color: Color) -> AnsiColors {
    match color {
        Color::Default => AnsiColors::Default,
        Color::Black => AnsiColors::Black,
        Color::Red => AnsiColors::Red,
        Color::Green => AnsiColors::Green,
        Color::Yellow => AnsiColors::Yellow,
        Color::Blue => AnsiColors::Blue,
        Color::Magenta => AnsiColors::Magenta,
        Color::Cyan => AnsiColors::Cyan,
        Color::White => AnsiColors::White,
        Color::BrightBlack => AnsiColors::BrightBlack,
    }
}

fn side_glyph(side: RangeSideState, rounded: &'static str) -> &'static str {
    match side {
        RangeSideState::Hidden => " ",
        RangeSideState::Squared => "━",
        RangeSideState::Rounded => rounded,
    }
}

/// Render one cell with its resolved style.
pub fn render_cell(state: &CellViewState, style: &CellStyle) -> String {
    let left = side_glyph(state.left_side, "╺");
    let right = side_glyph(state.right_side, "╸");
    let label = format!("{:>2}", state.label_text.as_deref().unwrap_or(""));

    let mut label = label.color(ansi(style.text)).to_string();
    if style.bold {
        label = label.bold().to_string();
    }
    if state.selected_highlight_visible {
        label = label.on_color(ansi(style.highlight)).to_string();
    }

    format!(
        "{}{}{}",
        left.color(ansi(style.band)),
        label,
        right.color(ansi(style.band))
    )
}

/// Render a month page: title, weekday header, then six weeks of cells.
pub fn render_month(session: &mut PickerSession, grid: &MonthGrid, styles: &StyleSheet) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(grid.month.format("%B %Y").bold().to_string());

    let header: String = MonthGrid::weekday_header(session.calendar())
        .iter()
        .map(|d| d.render())
        .collect();
    lines.push(header.dimmed().to_string());

    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|cell| {
                let state = session.cell_state(cell.date, cell.membership);
                render_cell(state, &styles.resolve(state))
            })
            .collect();
        lines.push(line);
    }

    lines
}
