//! Cell styles: a base day style with optional overrides merged on lookup.

use serde::{Deserialize, Serialize};

use crate::cell::CellViewState;

/// Named terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub text: Color,
    /// Endpoint highlight behind the label.
    pub highlight: Color,
    /// Range band between endpoints.
    pub band: Color,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            text: Color::Default,
            highlight: Color::Blue,
            band: Color::Cyan,
            bold: false,
        }
    }
}

/// Fields set here replace the base style's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverride {
    pub text: Option<Color>,
    pub highlight: Option<Color>,
    pub band: Option<Color>,
    pub bold: Option<bool>,
}

impl StyleOverride {
    pub fn apply(&self, base: CellStyle) -> CellStyle {
        CellStyle {
            text: self.text.unwrap_or(base.text),
            highlight: self.highlight.unwrap_or(base.highlight),
            band: self.band.unwrap_or(base.band),
            bold: self.bold.unwrap_or(base.bold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub day: CellStyle,
    pub today: StyleOverride,
    pub disabled: StyleOverride,
}

impl Default for StyleSheet {
    fn default() -> Self {
        StyleSheet {
            day: CellStyle::default(),
            today: StyleOverride {
                text: Some(Color::Red),
                bold: Some(true),
                ..StyleOverride::default()
            },
            disabled: StyleOverride {
                text: Some(Color::BrightBlack),
                ..StyleOverride::default()
            },
        }
    }
}

impl StyleSheet {
    /// Style for a cell: the day style, then the today override, then the
    /// disabled override.
    pub fn resolve(&self, state: &CellViewState) -> CellStyle {
        let mut style = self.day;
        if state.is_today {
            style = self.today.apply(style);
        }
        if !state.enabled {
            style = self.disabled.apply(style);
        }
        style
    }
}
