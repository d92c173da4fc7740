//! Probe command implementation.
//!
//! Reports what the hook would do in the current process: whether it
//! activates, which color depth it detects and which profile it selects.

use chromatrace_core::terminal::{ColorProbe, TerminalCapabilities};
use chromatrace_core::{ActivationGate, Colorizer, HookConfig, RenderProfile};
use colored::Colorize;
use serde_json::json;

/// Execute the probe command.
pub fn execute(config: HookConfig, json_output: bool) -> anyhow::Result<()> {
    let gate = ActivationGate::check(&config);

    // The profile needs the engine; without it only the depth is reported.
    let (probe, profile, engine_error) = match Colorizer::new(config.clone()) {
        Ok(colorizer) => {
            let probe = colorizer.probe();
            (probe, Some(colorizer.profile_for(probe)), None)
        }
        Err(e) => (TerminalCapabilities::probe(config.colors), None, Some(e.to_string())),
    };

    let skipped = gate.err().map(|r| r.to_string()).or(engine_error);

    if json_output {
        print_json(&config, skipped.as_deref(), &probe, profile.as_ref())
    } else {
        print_human(&config, skipped.as_deref(), &probe, profile.as_ref());
        Ok(())
    }
}

fn print_json(
    config: &HookConfig,
    skipped: Option<&str>,
    probe: &ColorProbe,
    profile: Option<&RenderProfile>,
) -> anyhow::Result<()> {
    let output = json!({
        "active": skipped.is_none(),
        "skip_reason": skipped,
        "config": config,
        "probe": probe,
        "profile": profile,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human(
    config: &HookConfig,
    skipped: Option<&str>,
    probe: &ColorProbe,
    profile: Option<&RenderProfile>,
) {
    println!("{}", "Chromatrace Probe".bold().cyan());
    println!();

    println!("{}", "Activation:".bold());
    match skipped {
        None => println!("  Status: {}", "✓ Hook would be installed".green()),
        Some(reason) => println!("  Status: {}", format!("✗ Skipped - {}", reason).yellow()),
    }
    println!();

    println!("{}", "Terminal:".bold());
    println!("  Colors: {} ({})", probe.colors, probe.source.to_string().dimmed());
    println!("  Depth: {}", probe.support);
    println!();

    println!("{}", "Profile:".bold());
    println!("  Style: {}", config.style);
    if let Some(path) = &config.theme_file {
        println!("  Theme file: {}", path.display().to_string().dimmed());
    }
    match profile {
        Some(profile) => {
            println!("  Theme: {}", profile.theme);
            if let Some(background) = profile.background {
                println!("  Background: {}", background);
            }
        }
        None => println!("  Theme: {}", "unavailable".red()),
    }
}
