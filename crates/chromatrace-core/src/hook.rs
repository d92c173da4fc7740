//! Panic hook installation and the trace colorizer.
//!
//! `install` runs the activation gate, builds a `Colorizer` and replaces
//! the process panic hook with one that prints the highlighted trace. Any
//! reason not to activate results in `Activation::Skipped` and the standard
//! hook stays in place.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::panic;

use crate::config::HookConfig;
use crate::error::{HookError, Result};
use crate::profile::RenderProfile;
use crate::report::{BacktraceStyle, PanicReport, render_error_chain};
use crate::stream::ErrorStream;
use crate::terminal::{ActivationGate, ColorProbe, SkipReason, TerminalCapabilities};

#[cfg(feature = "syntax")]
use crate::profile::{DEFAULT_THEME, ThemeChoice};
#[cfg(feature = "syntax")]
use crate::syntax::{SyntaxHighlighter, ThemeAdapter, render};
#[cfg(feature = "syntax")]
use syntect::highlighting::Theme;

/// Outcome of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The colorizing panic hook is active.
    Installed,
    /// The hook was not installed; panics print as usual.
    Skipped(SkipReason),
}

impl Activation {
    /// Whether the hook is active.
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed)
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => write!(f, "installed"),
            Self::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// Log a diagnostic, and print it to stderr when `enabled`.
///
/// Printed directly because a panicking program may have no subscriber.
pub(crate) fn debug_note(enabled: bool, message: &str) {
    write_debug_note(enabled, message, &mut io::stderr());
}

fn write_debug_note<W: Write>(enabled: bool, message: &str, out: &mut W) {
    tracing::debug!("{}", message);
    if enabled {
        let _ = writeln!(out, "{}", message);
    }
}

/// Skip activation because the colorizer could not be built.
fn skip_unavailable_engine<W: Write>(err: &HookError, debug: bool, out: &mut W) -> Activation {
    write_debug_note(debug, &format!("Failed to add coloring hook; {}", err), out);
    Activation::Skipped(SkipReason::EngineUnavailable(err.to_string()))
}

/// Highlights trace text for the current terminal.
pub struct Colorizer {
    config: HookConfig,
    #[cfg(feature = "syntax")]
    highlighter: SyntaxHighlighter,
    #[cfg(feature = "syntax")]
    custom_theme: Option<Theme>,
}

impl Colorizer {
    /// Build a colorizer; fails when the highlighting engine is unavailable.
    ///
    /// A theme file that cannot be loaded is reported as a diagnostic and
    /// the configured style is used instead.
    #[cfg(feature = "syntax")]
    pub fn new(config: HookConfig) -> Result<Self> {
        let highlighter = SyntaxHighlighter::new()?;

        let custom_theme = config.theme_file.as_deref().and_then(|path| {
            match ThemeAdapter::load_theme_file(path) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    debug_note(config.debug, &e.to_string());
                    None
                }
            }
        });

        Ok(Self { config, highlighter, custom_theme })
    }

    /// Build a colorizer; this build has no highlighting engine.
    #[cfg(not(feature = "syntax"))]
    pub fn new(config: HookConfig) -> Result<Self> {
        let _ = config;
        Err(HookError::EngineUnavailable)
    }

    /// The configuration this colorizer was built with.
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Probe the color depth, honoring the configured override.
    pub fn probe(&self) -> ColorProbe {
        let probe = TerminalCapabilities::probe(self.config.colors);
        debug_note(self.config.debug, &format!("Detected support for {} colors", probe.colors));
        probe
    }

    /// Select the rendering profile for the current terminal.
    pub fn profile(&self) -> RenderProfile {
        let probe = self.probe();
        self.profile_for(probe)
    }

    /// Select the rendering profile for a given probe result.
    #[cfg(feature = "syntax")]
    pub fn profile_for(&self, probe: ColorProbe) -> RenderProfile {
        let themes = self.highlighter.themes();
        RenderProfile::select(&self.config, probe.support, self.custom_theme.is_some(), |style| {
            themes.resolve_name(style)
        })
    }

    /// Select the rendering profile for a given probe result.
    #[cfg(not(feature = "syntax"))]
    pub fn profile_for(&self, probe: ColorProbe) -> RenderProfile {
        RenderProfile::select(&self.config, probe.support, false, |_| None)
    }

    /// Highlight trace text for the current terminal.
    pub fn colorize(&self, text: &str) -> String {
        let profile = self.profile();
        self.colorize_with(text, &profile)
    }

    /// Highlight trace text with an explicit profile.
    #[cfg(feature = "syntax")]
    pub fn colorize_with(&self, text: &str, profile: &RenderProfile) -> String {
        let Some(theme) = self.theme_for(profile) else {
            return text.to_string();
        };
        let lines = self.highlighter.highlight(text, theme);
        render(&lines, profile.support)
    }

    /// Highlight trace text with an explicit profile.
    #[cfg(not(feature = "syntax"))]
    pub fn colorize_with(&self, text: &str, _profile: &RenderProfile) -> String {
        text.to_string()
    }

    #[cfg(feature = "syntax")]
    fn theme_for(&self, profile: &RenderProfile) -> Option<&Theme> {
        let themes = self.highlighter.themes();
        match &profile.theme {
            ThemeChoice::Custom => {
                self.custom_theme.as_ref().or_else(|| themes.theme(DEFAULT_THEME).ok())
            }
            ThemeChoice::Named(name) => {
                themes.theme(name).or_else(|_| themes.theme(DEFAULT_THEME)).ok()
            }
        }
    }

    /// Write trace text to a stream, colorized when the stream renders ANSI.
    pub fn emit<W: Write>(&self, text: &str, stream: &mut ErrorStream<W>) -> io::Result<()> {
        if stream.supports_ansi() {
            stream.write_all(self.colorize(text).as_bytes())?;
        } else {
            stream.write_all(text.as_bytes())?;
        }
        stream.flush()
    }

    /// Print an error and its sources to stderr.
    ///
    /// Intended for errors that escape `main`.
    pub fn report_error(&self, err: &(dyn Error + 'static)) -> io::Result<()> {
        let text = render_error_chain(err);
        self.emit(&text, &mut ErrorStream::stderr())
    }

    /// Emit `text`, running `fallback` if it cannot be written.
    pub fn write_or_fallback<W, F>(&self, text: &str, stream: &mut ErrorStream<W>, fallback: F)
    where
        W: Write,
        F: FnOnce(),
    {
        if let Err(e) = self.emit(text, stream) {
            tracing::error!("Failed to write colored trace: {}", e);
            fallback();
        }
    }

    /// Replace the process panic hook with one printing through `self`.
    ///
    /// If the colored trace cannot be written, the hook that was installed
    /// before runs instead. Backtraces follow `RUST_BACKTRACE` only.
    pub fn install_hook(self) {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let report = PanicReport::from_hook_info(info, BacktraceStyle::from_env().capture());
            let mut stream = ErrorStream::stderr();
            self.write_or_fallback(&report.render(), &mut stream, || previous(info));
        }));
    }
}

/// Install the colorizing panic hook.
///
/// Skips activation when `NO_COLOR` is set, when stderr is not a terminal
/// (unless `config.always`), or when the highlighting engine cannot be set
/// up. Only the last case prints a message, and only with `config.debug`.
pub fn install(config: HookConfig) -> Activation {
    if let Err(reason) = ActivationGate::check(&config) {
        tracing::debug!(%reason, "chromatrace hook not installed");
        return Activation::Skipped(reason);
    }

    let debug = config.debug;
    match Colorizer::new(config) {
        Ok(colorizer) => {
            colorizer.install_hook();
            tracing::debug!("chromatrace hook installed");
            Activation::Installed
        }
        Err(e) => skip_unavailable_engine(&e, debug, &mut io::stderr()),
    }
}

/// Install the hook with configuration from files and the environment.
pub fn install_from_env() -> Activation {
    install(HookConfig::discover())
}
