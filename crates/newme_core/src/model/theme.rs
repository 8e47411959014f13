//! Visual theme preferences.
//!
//! Themes sit outside the gamification core but share its persistence
//! contract. Only the selected id and the light/dark mode are stored.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_ID: &str = "classic-white";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub id: &'static str,
    pub name: &'static str,
    /// Main brand color.
    pub hex: &'static str,
    /// Foreground color drawn on top of `hex`.
    pub on_main: &'static str,
    /// Light-mode page background.
    pub background: &'static str,
}

const fn theme(
    id: &'static str,
    name: &'static str,
    hex: &'static str,
    on_main: &'static str,
    background: &'static str,
) -> ColorTheme {
    ColorTheme {
        id,
        name,
        hex,
        on_main,
        background,
    }
}

pub const COLOR_THEMES: [ColorTheme; 10] = [
    theme(DEFAULT_THEME_ID, "Classic White", "#4f46e5", "#ffffff", "#ffffff"),
    theme("canary-yellow", "Canary Yellow", "#FFD700", "#000000", "#FFFEF0"),
    theme("fire-red", "Fire Red", "#EF394E", "#ffffff", "#FFF5F6"),
    theme("electric-blue", "Electric Blue", "#0066FF", "#ffffff", "#F0F7FF"),
    theme("neon-green", "Neon Green", "#00D68F", "#000000", "#F0FFF9"),
    theme("vivid-orange", "Vivid Orange", "#FF5C00", "#ffffff", "#FFF8F5"),
    theme("royal-purple", "Royal Purple", "#7000FF", "#ffffff", "#F8F4FF"),
    theme("toxic-lime", "Neon Lime", "#A3FF00", "#000000", "#FBFFF2"),
    theme("hot-pink", "Hot Pink", "#FF00A8", "#ffffff", "#FFF2FA"),
    theme("pure-gold", "Pure Gold", "#C5A059", "#ffffff", "#FAF9F6"),
];

/// Looks up a theme by id.
pub fn find_theme(id: &str) -> Option<&'static ColorTheme> {
    COLOR_THEMES.iter().find(|theme| theme.id == id)
}

/// Resolves a theme for display, falling back to the default for unknown ids.
pub fn resolve_theme(id: &str) -> &'static ColorTheme {
    find_theme(id).unwrap_or(&COLOR_THEMES[0])
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
