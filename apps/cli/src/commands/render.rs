//! Render command implementation.
//!
//! Highlights saved trace text the same way the panic hook would.

use anyhow::Context;
use chromatrace_core::{Colorizer, EnvHints, HookConfig};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Execute the render command.
pub fn execute(
    mut config: HookConfig,
    file: Option<PathBuf>,
    style: Option<String>,
    colors: Option<u32>,
) -> anyhow::Result<()> {
    if let Some(style) = style {
        config = config.with_style(style);
    }
    if let Some(colors) = colors {
        config = config.with_colors(colors);
    }

    let text = match &file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read trace from stdin")?;
            buf
        }
    };

    let output = if EnvHints::detect().no_color_requested() {
        tracing::debug!("NO_COLOR is set, rendering plain text");
        text
    } else {
        Colorizer::new(config)?.colorize(&text)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
