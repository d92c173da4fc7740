//! Command implementations for the Chromatrace CLI.

pub mod demo;
pub mod probe;
pub mod render;
pub mod styles;
