use anyhow::Result;
use chrono::NaiveDate;
use datepick_core::config::PickerConfig;
use owo_colors::OwoColorize;

use crate::commands::{calendar_for, parse_selection};
use crate::render::render_selection;

pub fn run(config: &PickerConfig, today: Option<NaiveDate>, select: Option<&str>) -> Result<()> {
    let calendar = calendar_for(config, today)?;
    let mut session = config.session(calendar.clone())?.build();

    if session.shortcuts().is_empty() {
        println!("{}", "No shortcuts configured".dimmed());
        return Ok(());
    }

    if let Some(spec) = select {
        session.select(parse_selection(&calendar, spec)?)?;
    }

    let active = session.active_shortcuts();
    for shortcut in session.shortcuts() {
        let value = render_selection(&shortcut.generate(&calendar), &calendar);
        if active.contains(&shortcut.name()) {
            println!("{} {} {}", "●".green(), shortcut.name().green(), value.dimmed());
        } else {
            println!("{} {} {}", "○".dimmed(), shortcut.name(), value.dimmed());
        }
    }

    Ok(())
}
