//! Theme adapter for resolving highlighting styles to syntect themes.
//!
//! Style names are either short aliases (`light`, `github`, ...) or the
//! name of any theme bundled with syntect. Custom themes can be loaded
//! from TextMate `.tmTheme` files.

use crate::error::{HookError, Result};
use crate::profile::DEFAULT_THEME;
use std::path::Path;
use syntect::highlighting::{Color, Theme, ThemeSet};

/// Style aliases: (alias, theme name, description).
pub const STYLE_ALIASES: &[(&str, &str, &str)] = &[
    ("default", DEFAULT_THEME, "Default style (dark)"),
    ("dark", "base16-ocean.dark", "Dark background"),
    ("light", "base16-ocean.light", "Light background"),
    ("github", "InspiredGitHub", "GitHub-style light theme"),
    ("eighties", "base16-eighties.dark", "Base16 Eighties dark theme"),
    ("mocha", "base16-mocha.dark", "Base16 Mocha dark theme"),
    ("solarized-dark", "Solarized (dark)", "Solarized dark palette"),
    ("solarized-light", "Solarized (light)", "Solarized light palette"),
];

/// Resolves style names against the bundled theme set.
pub struct ThemeAdapter {
    theme_set: ThemeSet,
}

impl ThemeAdapter {
    /// Create an adapter over syntect's default themes.
    pub fn new() -> Self {
        Self { theme_set: ThemeSet::load_defaults() }
    }

    /// Canonical theme name for a style, if it exists.
    ///
    /// Aliases are checked first, then exact theme names, then theme names
    /// ignoring ASCII case.
    pub fn resolve_name(&self, style: &str) -> Option<String> {
        let style = style.trim();

        if let Some((_, theme, _)) =
            STYLE_ALIASES.iter().find(|(alias, _, _)| alias.eq_ignore_ascii_case(style))
        {
            if self.theme_set.themes.contains_key(*theme) {
                return Some((*theme).to_string());
            }
        }

        if self.theme_set.themes.contains_key(style) {
            return Some(style.to_string());
        }

        self.theme_set.themes.keys().find(|name| name.eq_ignore_ascii_case(style)).cloned()
    }

    /// Look up the theme for a style name.
    pub fn theme(&self, style: &str) -> Result<&Theme> {
        self.resolve_name(style)
            .and_then(|name| self.theme_set.themes.get(&name))
            .ok_or_else(|| HookError::UnknownStyle(style.to_string()))
    }

    /// Names of all bundled themes.
    pub fn theme_names(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(String::as_str).collect()
    }

    /// Load a theme from a TextMate .tmTheme file.
    pub fn load_theme_file(path: &Path) -> Result<Theme> {
        ThemeSet::get_theme(path).map_err(|e| HookError::ThemeFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the foreground (text) color from a syntect theme.
    pub fn foreground_color(theme: &Theme) -> Option<Color> {
        theme.settings.foreground
    }

    /// Convert syntect Color to RGB tuple.
    pub fn color_to_rgb(color: Color) -> (u8, u8, u8) {
        (color.r, color.g, color.b)
    }
}

impl Default for ThemeAdapter {
    fn default() -> Self {
        Self::new()
    }
}
