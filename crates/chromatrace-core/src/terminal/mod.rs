//! Terminal capability detection and color conversion.
//!
//! Provides utilities for deciding whether to colorize at all, probing the
//! terminal's color depth, and converting colors between color spaces
//! (truecolor, 256-color, 16-color).

pub mod capabilities;
pub mod color_conversion;
pub mod gate;

pub use capabilities::{ColorProbe, ColorSupport, EnvHints, ProbeSource, TerminalCapabilities};
pub use color_conversion::{foreground_sgr, rgb_to_16, rgb_to_256};
pub use gate::{ActivationGate, SkipReason};
