mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use datepick_core::config::PickerConfig;

#[derive(Parser)]
#[command(name = "datepick")]
#[command(about = "Replay date-picker taps and render the resulting month grid")]
struct Cli {
    /// Log selection transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a month with the selection produced by the given taps
    Show {
        /// Picker configuration (defaults to ~/.config/datepick/picker.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Month to display (YYYY-MM), defaults to the selection's month or today
        #[arg(short, long)]
        month: Option<String>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Programmatic selection applied before taps (YYYY-MM-DD or YYYY-MM-DD..YYYY-MM-DD)
        #[arg(long)]
        select: Option<String>,

        /// Apply a configured shortcut by name before taps
        #[arg(long)]
        shortcut: Option<String>,

        /// Tap these dates in order (YYYY-MM-DD)
        #[arg(short, long = "tap")]
        taps: Vec<NaiveDate>,

        /// Print cell states as JSON instead of drawing the grid
        #[arg(long)]
        json: bool,
    },
    /// List configured shortcuts and whether each matches a selection
    Shortcuts {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        today: Option<NaiveDate>,

        /// Selection to match against (YYYY-MM-DD or YYYY-MM-DD..YYYY-MM-DD)
        #[arg(long)]
        select: Option<String>,
    },
    /// Write a commented default configuration file
    Init {
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose)?;

    match cli.command {
        Commands::Show {
            config,
            month,
            today,
            select,
            shortcut,
            taps,
            json,
        } => {
            let config = load_config(config)?;
            commands::show::run(
                &config,
                commands::show::ShowArgs {
                    month,
                    today,
                    select,
                    shortcut,
                    taps,
                    json,
                },
            )
        }
        Commands::Shortcuts {
            config,
            today,
            select,
        } => {
            let config = load_config(config)?;
            commands::shortcuts::run(&config, today, select.as_deref())
        }
        Commands::Init { path } => {
            let path = match path {
                Some(p) => p,
                None => PickerConfig::config_path()?,
            };
            commands::init::run(&path)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<PickerConfig> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file '{}' not found", p.display());
            }
            p
        }
        None => PickerConfig::config_path()?,
    };

    PickerConfig::load(&path).with_context(|| format!("Could not load {}", path.display()))
}
