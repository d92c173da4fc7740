//! Demo command implementation.
//!
//! Fails on purpose so the highlighted output can be seen. Activation is
//! forced, but `NO_COLOR` still disables the hook.

use chromatrace_core::{Activation, ActivationGate, Colorizer, HookConfig, render_error_chain};
use std::fmt;
use std::io::{self, Write};

/// Startup failure used by `demo --error`.
#[derive(Debug)]
struct DemoError {
    source: io::Error,
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to start demo service")
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Execute the demo command.
pub fn execute(config: HookConfig, error: bool) -> anyhow::Result<()> {
    let config = config.always(true);

    if error {
        report_demo_error(config)?;
        std::process::exit(1);
    }

    match chromatrace_core::install(config) {
        Activation::Installed => tracing::debug!("demo hook installed"),
        Activation::Skipped(reason) => tracing::debug!(%reason, "demo hook skipped"),
    }

    panic!("demo settings were never loaded");
}

fn report_demo_error(config: HookConfig) -> anyhow::Result<()> {
    let err = DemoError {
        source: io::Error::new(io::ErrorKind::AddrInUse, "address 127.0.0.1:8080 already in use"),
    };

    if ActivationGate::check(&config).is_ok() {
        if let Ok(colorizer) = Colorizer::new(config) {
            colorizer.report_error(&err)?;
            return Ok(());
        }
    }

    let mut stderr = io::stderr().lock();
    stderr.write_all(render_error_chain(&err).as_bytes())?;
    Ok(())
}
