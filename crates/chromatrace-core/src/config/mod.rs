//! Hook configuration.
//!
//! `HookConfig` is the single configuration object of the hook. It can be
//! built in code, loaded from a TOML file, or overridden through
//! `CHROMATRACE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Forces activation when stderr is not a terminal.
pub const ENV_ALWAYS: &str = "CHROMATRACE_ALWAYS";
/// Highlighting style name.
pub const ENV_STYLE: &str = "CHROMATRACE_STYLE";
/// Color count override.
pub const ENV_COLORS: &str = "CHROMATRACE_COLORS";
/// Diagnostic messages on stderr.
pub const ENV_DEBUG: &str = "CHROMATRACE_DEBUG";
/// Custom `.tmTheme` path.
pub const ENV_THEME_FILE: &str = "CHROMATRACE_THEME_FILE";

/// Style used when none is configured.
pub const DEFAULT_STYLE: &str = "default";

/// Configuration for the trace colorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Activate even when stderr is not a terminal
    #[serde(default)]
    pub always: bool,

    /// Highlighting style (alias such as "light"/"dark" or a theme name)
    #[serde(default = "default_style")]
    pub style: String,

    /// Color count override; skips the terminfo probe when set
    #[serde(default)]
    pub colors: Option<u32>,

    /// Print diagnostic messages to stderr
    #[serde(default)]
    pub debug: bool,

    /// Custom `.tmTheme` file used instead of the named style
    #[serde(default)]
    pub theme_file: Option<PathBuf>,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

impl Default for HookConfig {
    fn default() -> Self {
        Self { always: false, style: default_style(), colors: None, debug: false, theme_file: None }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Partial configuration as found in a file or the environment.
///
/// Only the fields that are present override the target.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    always: Option<bool>,
    style: Option<String>,
    colors: Option<u32>,
    debug: Option<bool>,
    theme_file: Option<PathBuf>,
}

impl HookConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate even when stderr is not a terminal.
    #[must_use]
    pub fn always(mut self, always: bool) -> Self {
        self.always = always;
        self
    }

    /// Set the highlighting style.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Override the probed color count; 0 keeps probing the terminal.
    #[must_use]
    pub fn with_colors(mut self, colors: u32) -> Self {
        self.colors = color_override(colors);
        self
    }

    /// Enable diagnostic messages.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Use a custom `.tmTheme` file.
    #[must_use]
    pub fn with_theme_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_file = Some(path.into());
        self
    }

    /// Defaults overridden by `CHROMATRACE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_with(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration from a TOML file.
    ///
    /// Fields missing from the file keep their defaults. A relative
    /// `theme_file` is resolved against the file's directory.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let overlay = read_overlay(path)?;
        let mut config = Self::default();
        config.merge(overlay);
        Ok(config)
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chromatrace").join("config.toml"))
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".chromatrace.toml")
    }

    /// Discover and load configuration.
    ///
    /// Precedence, lowest first:
    /// 1. Defaults
    /// 2. Global config (`<config dir>/chromatrace/config.toml`)
    /// 3. Local config (`./.chromatrace.toml`)
    /// 4. `CHROMATRACE_*` environment variables
    ///
    /// Unreadable or invalid files are logged and skipped.
    pub fn discover() -> Self {
        let mut candidates = Vec::new();
        if let Some(global) = Self::default_global_path() {
            candidates.push(global);
        }
        candidates.push(Self::default_local_path());

        Self::layered(&candidates, |key| std::env::var(key).ok())
    }

    /// Defaults overlaid with each file in order, then the environment.
    ///
    /// Later files override only the fields they set. Missing files are
    /// skipped silently, broken ones with a warning.
    pub fn layered<F>(files: &[PathBuf], lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        for path in files {
            match read_overlay(path) {
                Ok(overlay) => {
                    tracing::debug!(path = %path.display(), "loaded chromatrace config");
                    config.merge(overlay);
                }
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => tracing::warn!("Ignoring config file: {}", e),
            }
        }

        config.apply_env_with(lookup);
        config
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overlay = env_overlay(lookup);
        self.merge(overlay);
    }

    fn merge(&mut self, overlay: ConfigOverlay) {
        if let Some(always) = overlay.always {
            self.always = always;
        }
        if let Some(style) = overlay.style {
            self.style = style;
        }
        if let Some(colors) = overlay.colors {
            self.colors = color_override(colors);
        }
        if let Some(debug) = overlay.debug {
            self.debug = debug;
        }
        if let Some(theme_file) = overlay.theme_file {
            self.theme_file = Some(theme_file);
        }
    }
}

fn read_overlay(path: &Path) -> ConfigResult<ConfigOverlay> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

    let mut overlay: ConfigOverlay = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    if let (Some(theme), Some(parent)) = (overlay.theme_file.as_ref(), path.parent()) {
        if theme.is_relative() {
            overlay.theme_file = Some(parent.join(theme));
        }
    }

    Ok(overlay)
}

fn env_overlay<F>(lookup: F) -> ConfigOverlay
where
    F: Fn(&str) -> Option<String>,
{
    let colors = lookup(ENV_COLORS).and_then(|raw| match raw.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!("Ignoring {}={:?}: not a color count", ENV_COLORS, raw);
            None
        }
    });

    ConfigOverlay {
        always: lookup(ENV_ALWAYS).and_then(|v| parse_flag(ENV_ALWAYS, &v)),
        style: lookup(ENV_STYLE).filter(|s| !s.trim().is_empty()),
        colors,
        debug: lookup(ENV_DEBUG).and_then(|v| parse_flag(ENV_DEBUG, &v)),
        theme_file: lookup(ENV_THEME_FILE).filter(|s| !s.is_empty()).map(PathBuf::from),
    }
}

/// A color count of 0 means "probe the terminal".
fn color_override(colors: u32) -> Option<u32> {
    (colors > 0).then_some(colors)
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            tracing::debug!("Ignoring {}={:?}: not a boolean", key, other);
            None
        }
    }
}
