//! Terminal capability detection.
//!
//! Detects terminal color support (16-color, 256-color, or truecolor) by
//! querying the terminfo database for the `colors` capability. Platforms
//! without terminfo use a fixed default of 16 colors.

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::env;
use std::fmt;

/// Color count assumed when the terminal cannot be queried.
pub const FALLBACK_COLORS: u32 = 16;

/// Terminal color support levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSupport {
    /// 16-color ANSI support
    Color16,
    /// 256-color support
    Color256,
    /// Truecolor (24-bit RGB) support
    Truecolor,
}

impl ColorSupport {
    /// Map a raw color count to a support level.
    ///
    /// Counts below 256, including 0 and 8, are treated as 16-color.
    pub fn from_color_count(colors: u32) -> Self {
        if colors >= 1 << 24 {
            Self::Truecolor
        } else if colors >= 256 {
            Self::Color256
        } else {
            Self::Color16
        }
    }

    /// Number of colors this level can display.
    pub fn color_count(self) -> u32 {
        match self {
            Self::Color16 => 16,
            Self::Color256 => 256,
            Self::Truecolor => 1 << 24,
        }
    }

    /// Whether this level renders a style's own palette.
    pub fn is_extended(self) -> bool {
        self >= Self::Color256
    }
}

impl fmt::Display for ColorSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color16 => write!(f, "16-color"),
            Self::Color256 => write!(f, "256-color"),
            Self::Truecolor => write!(f, "truecolor"),
        }
    }
}

/// Snapshot of the environment variables that affect coloring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvHints {
    /// `NO_COLOR` (https://no-color.org)
    pub no_color: Option<String>,
    /// `TERM`
    pub term: Option<String>,
    /// `COLORTERM`
    pub colorterm: Option<String>,
}

impl EnvHints {
    /// Read the hints from the process environment.
    pub fn detect() -> Self {
        Self {
            no_color: env::var("NO_COLOR").ok(),
            term: env::var("TERM").ok(),
            colorterm: env::var("COLORTERM").ok(),
        }
    }

    /// `NO_COLOR` only counts when it is non-empty.
    pub fn no_color_requested(&self) -> bool {
        self.no_color.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// COLORTERM=truecolor or COLORTERM=24bit
    pub fn advertises_truecolor(&self) -> bool {
        self.colorterm.as_deref().is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            v == "truecolor" || v == "24bit"
        })
    }
}

/// Where a color count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeSource {
    /// Set explicitly in the configuration
    Override,
    /// The terminfo `colors` capability
    Terminfo,
    /// Fixed default, terminfo unavailable
    Fallback,
}

impl fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Terminfo => write!(f, "terminfo"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of a color-depth probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorProbe {
    /// Raw color count
    pub colors: u32,
    /// Where the count came from
    pub source: ProbeSource,
    /// Support level used for rendering
    pub support: ColorSupport,
}

/// Terminal capabilities detector.
pub struct TerminalCapabilities;

static DETECTED_CAPABILITIES: OnceCell<ColorProbe> = OnceCell::new();

impl TerminalCapabilities {
    /// Query terminfo for the `colors` capability of `$TERM`.
    ///
    /// Returns `None` when `$TERM` is unset, has no terminfo entry, or the
    /// entry has no `colors` number.
    #[cfg(unix)]
    pub fn terminfo_colors() -> Option<u32> {
        match term::terminfo::TermInfo::from_env() {
            Ok(info) => info.numbers.get("colors").map(|&n| u32::from(n)),
            Err(e) => {
                tracing::debug!("terminfo lookup failed: {}", e);
                None
            }
        }
    }

    /// Platforms without terminfo.
    #[cfg(not(unix))]
    pub fn terminfo_colors() -> Option<u32> {
        None
    }

    /// Decide the color depth from its inputs.
    ///
    /// An explicit override wins. Otherwise the terminfo count is used,
    /// falling back to 16 colors, and COLORTERM=truecolor|24bit upgrades the
    /// result to truecolor.
    pub fn resolve(
        override_colors: Option<u32>,
        terminfo_colors: Option<u32>,
        hints: &EnvHints,
    ) -> ColorProbe {
        if let Some(colors) = override_colors {
            return ColorProbe {
                colors,
                source: ProbeSource::Override,
                support: ColorSupport::from_color_count(colors),
            };
        }

        let (colors, source) = match terminfo_colors {
            Some(n) => (n, ProbeSource::Terminfo),
            None => (FALLBACK_COLORS, ProbeSource::Fallback),
        };

        let support = if hints.advertises_truecolor() {
            ColorSupport::Truecolor
        } else {
            ColorSupport::from_color_count(colors)
        };

        ColorProbe { colors, source, support }
    }

    /// Probe the current terminal, honoring an explicit override.
    pub fn probe(override_colors: Option<u32>) -> ColorProbe {
        if override_colors.is_some() {
            return Self::resolve(override_colors, None, &EnvHints::default());
        }
        Self::detect()
    }

    /// Probe the current terminal once and cache the result.
    pub fn detect() -> ColorProbe {
        *DETECTED_CAPABILITIES
            .get_or_init(|| Self::resolve(None, Self::terminfo_colors(), &EnvHints::detect()))
    }

    /// Get the detected color support (cached).
    pub fn color_support() -> ColorSupport {
        Self::detect().support
    }
}
