//! Styles command implementation.

use chromatrace_core::syntax::{STYLE_ALIASES, ThemeAdapter};
use colored::Colorize;

/// List style aliases and the bundled themes they can also name directly.
pub fn execute() -> anyhow::Result<()> {
    let themes = ThemeAdapter::new();

    println!("{}", "Style aliases:".bold());
    println!();
    for (alias, theme, description) in STYLE_ALIASES {
        println!("  {} {} - {}", format!("{:<16}", alias).bright_green(), theme.dimmed(), description);
    }
    println!();

    let mut names = themes.theme_names();
    names.sort_unstable();

    println!("{}", "Bundled themes:".bold());
    println!();
    for name in names {
        println!("  {}", name);
    }

    Ok(())
}
