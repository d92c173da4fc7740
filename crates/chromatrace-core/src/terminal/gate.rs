//! Activation gate.
//!
//! Decides whether the hook should be installed at all: the user may opt
//! out through `NO_COLOR`, and colors are only written to an interactive
//! stderr unless activation is forced.

use std::fmt;
use std::io::{self, IsTerminal};

use crate::config::HookConfig;
use crate::terminal::EnvHints;

/// Why the hook was not installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `NO_COLOR` is set to a non-empty value
    NoColor,
    /// stderr is not a terminal and activation was not forced
    NotATerminal,
    /// The highlighting engine could not be set up
    EngineUnavailable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoColor => write!(f, "NO_COLOR is set"),
            Self::NotATerminal => write!(f, "stderr is not a terminal"),
            Self::EngineUnavailable(reason) => write!(f, "{}", reason),
        }
    }
}

/// Activation decision for the hook.
pub struct ActivationGate;

impl ActivationGate {
    /// Evaluate the gate from explicit inputs.
    ///
    /// The `NO_COLOR` opt-out is checked first and wins over `always`.
    pub fn evaluate(
        config: &HookConfig,
        hints: &EnvHints,
        stderr_is_tty: bool,
    ) -> Result<(), SkipReason> {
        if hints.no_color_requested() {
            return Err(SkipReason::NoColor);
        }
        if config.always || stderr_is_tty {
            Ok(())
        } else {
            Err(SkipReason::NotATerminal)
        }
    }

    /// Evaluate the gate against the running process.
    pub fn check(config: &HookConfig) -> Result<(), SkipReason> {
        Self::evaluate(config, &EnvHints::detect(), io::stderr().is_terminal())
    }
}
