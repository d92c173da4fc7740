//! Chromatrace Core - syntax-highlighted panic and error traces.
//!
//! This crate installs a panic hook that prints the panic trace with
//! syntax highlighting when stderr is an interactive terminal. It provides:
//! - Activation gating (`NO_COLOR`, tty detection, engine availability)
//! - Terminal color-depth probing through terminfo
//! - Rendering profile selection (color depth, background, style)
//! - A syntect-backed highlighter for panic and error-chain text
//!
//! # Example
//!
//! ```rust,no_run
//! use chromatrace_core::{Activation, HookConfig};
//!
//! fn main() {
//!     let config = HookConfig::new().with_style("github");
//!     if let Activation::Skipped(reason) = chromatrace_core::install(config) {
//!         eprintln!("plain traces: {}", reason);
//!     }
//!
//!     panic!("something went wrong");
//! }
//! ```

pub mod config;
pub mod error;
pub mod hook;
pub mod profile;
pub mod report;
pub mod stream;
pub mod syntax;
pub mod terminal;

pub use config::{ConfigError, HookConfig};
pub use error::{HookError, Result};
pub use hook::{Activation, Colorizer, install, install_from_env};
pub use profile::{Background, RenderProfile, ThemeChoice};
pub use report::{BacktraceStyle, BacktraceText, PanicReport, render_error_chain};
pub use stream::ErrorStream;
pub use terminal::{ActivationGate, ColorSupport, EnvHints, SkipReason, TerminalCapabilities};
