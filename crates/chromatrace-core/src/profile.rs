//! Rendering profile selection.
//!
//! Combines the probed color depth with the configured style. Terminals
//! with 256 colors or more render the style's own palette. 16-color
//! terminals only distinguish a light or dark background, and the trace is
//! quantized from a palette theme matching that background.

use crate::config::HookConfig;
use crate::hook::debug_note;
use crate::terminal::ColorSupport;
use serde::Serialize;
use std::fmt;

/// Theme used for the `default` style.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Terminal background assumed by a 16-color profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl Background {
    /// Theme whose colors are quantized for this background.
    pub fn palette_theme(self) -> &'static str {
        match self {
            Self::Light => "base16-ocean.light",
            Self::Dark => "base16-ocean.dark",
        }
    }

    /// `light` or `dark`, ignoring ASCII case.
    pub fn from_style(style: &str) -> Option<Self> {
        if style.eq_ignore_ascii_case("light") {
            Some(Self::Light)
        } else if style.eq_ignore_ascii_case("dark") {
            Some(Self::Dark)
        } else {
            None
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Which theme the highlighter should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum ThemeChoice {
    /// A bundled theme, by canonical name
    Named(String),
    /// The configured `.tmTheme` file
    Custom,
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::Custom => write!(f, "custom theme file"),
        }
    }
}

/// Everything needed to render a trace for one terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderProfile {
    /// Color depth used for escape sequences
    pub support: ColorSupport,
    /// Background assumption (16-color profiles only)
    pub background: Option<Background>,
    /// Theme to highlight with
    pub theme: ThemeChoice,
}

impl RenderProfile {
    /// Select the profile for a color depth.
    ///
    /// `resolve` maps a style name to a canonical theme name, returning
    /// `None` for unknown styles. `has_custom_theme` is true when a theme
    /// file was configured and loaded.
    pub fn select<F>(
        config: &HookConfig,
        support: ColorSupport,
        has_custom_theme: bool,
        resolve: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if !support.is_extended() {
            let background = Background::from_style(&config.style).unwrap_or(Background::Dark);
            return Self {
                support,
                background: Some(background),
                theme: ThemeChoice::Named(background.palette_theme().to_string()),
            };
        }

        if has_custom_theme {
            return Self { support, background: None, theme: ThemeChoice::Custom };
        }

        let theme = resolve(&config.style).unwrap_or_else(|| {
            debug_note(
                config.debug,
                &format!("Style not found: {}; using {}", config.style, DEFAULT_THEME),
            );
            DEFAULT_THEME.to_string()
        });

        Self { support, background: None, theme: ThemeChoice::Named(theme) }
    }
}
