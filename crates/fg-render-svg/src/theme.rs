//! Color themes for fretboard rendering.
//!
//! The default palette is the reference implementation's: blue dots with a
//! red accent for the root, a green ring for open strings, and dark slate
//! grid lines.

use std::str::FromStr;

/// Theme preset identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreset {
    /// Warm board with the reference colors.
    #[default]
    Default,
    /// Dark background with bright markers.
    Dark,
    /// Black and white only, for print.
    Monochrome,
}

/// Error type for theme preset parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemePresetError(String);

impl std::fmt::Display for ParseThemePresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme preset: {}", self.0)
    }
}

impl std::error::Error for ParseThemePresetError {}

impl FromStr for ThemePreset {
    type Err = ParseThemePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "dark" => Ok(Self::Dark),
            "monochrome" | "mono" => Ok(Self::Monochrome),
            _ => Err(ParseThemePresetError(s.to_string())),
        }
    }
}

impl ThemePreset {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Monochrome => "monochrome",
        }
    }
}

/// Concrete colors for every painted part of a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub string_line: &'static str,
    pub fret_line: &'static str,
    pub nut: &'static str,
    pub label: &'static str,
    pub fret_number: &'static str,
    pub dot: &'static str,
    pub dot_root: &'static str,
    pub dot_stroke: &'static str,
    pub open_ring: &'static str,
    pub mute_cross: &'static str,
}

impl Theme {
    #[must_use]
    pub const fn preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Default => Self {
                background: "#ffeaa7",
                string_line: "#2d3436",
                fret_line: "#636e72",
                nut: "#2d3436",
                label: "#2c3e50",
                fret_number: "#7f8c8d",
                dot: "#3498db",
                dot_root: "#e74c3c",
                dot_stroke: "#2c3e50",
                open_ring: "#27ae60",
                mute_cross: "#e74c3c",
            },
            ThemePreset::Dark => Self {
                background: "#1e272e",
                string_line: "#d2dae2",
                fret_line: "#808e9b",
                nut: "#d2dae2",
                label: "#d2dae2",
                fret_number: "#808e9b",
                dot: "#4bcffa",
                dot_root: "#ff5e57",
                dot_stroke: "#d2dae2",
                open_ring: "#0be881",
                mute_cross: "#ff5e57",
            },
            ThemePreset::Monochrome => Self {
                background: "#ffffff",
                string_line: "#000000",
                fret_line: "#555555",
                nut: "#000000",
                label: "#000000",
                fret_number: "#555555",
                dot: "#000000",
                dot_root: "#000000",
                dot_stroke: "#000000",
                open_ring: "#000000",
                mute_cross: "#000000",
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemePreset::Default)
    }
}
