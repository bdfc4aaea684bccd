use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            // dark leaves the terminal's own colours alone
            Theme::Dark => Palette {
                background: Color::Reset,
                text: Color::Reset,
                title: Color::Yellow,
                heading: Color::Magenta,
                accent: Color::Cyan,
                good: Color::Green,
                bad: Color::Red,
                warning: Color::Yellow,
            },
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                title: Color::Rgb(0x9a, 0x67, 0x00),
                heading: Color::Rgb(0x82, 0x50, 0xdf),
                accent: Color::Blue,
                good: Color::Rgb(0x1a, 0x7f, 0x37),
                bad: Color::Rgb(0xcf, 0x22, 0x2e),
                warning: Color::Rgb(0x9a, 0x67, 0x00),
            },
        }
    }
}

/// Colours every screen draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub title: Color,
    pub heading: Color,
    pub accent: Color,
    pub good: Color,
    pub bad: Color,
    pub warning: Color,
}

impl Palette {
    /// Base style painted under a whole screen
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}
