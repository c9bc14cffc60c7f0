//! Light and dark colour themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> &'static Palette {
        Palette::for_mode(self)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme mode: {0}")]
pub struct UnknownThemeMode(String);

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(UnknownThemeMode(other.to_string())),
        }
    }
}

/// Named colours for one mode, as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_on_primary: &'static str,
    pub muted: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub shadow: &'static str,
}

pub const LIGHT: Palette = Palette {
    primary: "#0F52BA",
    secondary: "#FF8C42",
    background: "#F7F9FC",
    card: "#FFFFFF",
    border: "#E0E6ED",
    text_primary: "#0D1B2A",
    text_secondary: "#415A77",
    text_on_primary: "#FFFFFF",
    muted: "#9AA5B1",
    error: "#D90429",
    success: "#2D6A4F",
    shadow: "rgba(13, 27, 42, 0.08)",
};

pub const DARK: Palette = Palette {
    primary: "#69A1FF",
    secondary: "#FFB347",
    background: "#0D1B2A",
    card: "#1B263B",
    border: "#415A77",
    text_primary: "#E0E6ED",
    text_secondary: "#9AA5B1",
    text_on_primary: "#FFFFFF",
    muted: "#6B7B8C",
    error: "#FF6B6B",
    success: "#51CF66",
    shadow: "rgba(0, 0, 0, 0.3)",
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}
