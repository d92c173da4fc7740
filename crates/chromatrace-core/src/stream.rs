//! Error stream wrapper.
//!
//! Colored traces are written through `ErrorStream`. On Windows the
//! `console` feature switches the console into virtual-terminal mode so
//! escape sequences are translated; if that fails the stream reports that
//! it cannot carry ANSI and callers write the plain trace instead.

use once_cell::sync::OnceCell;
use std::io::{self, Write};

static ANSI_TRANSLATION: OnceCell<bool> = OnceCell::new();

/// A writer for trace output that knows whether it can carry ANSI colors.
pub struct ErrorStream<W: Write = io::StderrLock<'static>> {
    inner: W,
    supports_ansi: bool,
}

impl ErrorStream {
    /// Locked stderr, with color translation enabled where available.
    pub fn stderr() -> Self {
        let supports_ansi = *ANSI_TRANSLATION.get_or_init(enable_ansi_translation);
        Self { inner: io::stderr().lock(), supports_ansi }
    }
}

impl<W: Write> ErrorStream<W> {
    /// Wrap an arbitrary writer.
    pub fn from_writer(inner: W, supports_ansi: bool) -> Self {
        Self { inner, supports_ansi }
    }

    /// Whether escape sequences written to this stream are rendered.
    pub fn supports_ansi(&self) -> bool {
        self.supports_ansi
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ErrorStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(all(windows, feature = "console"))]
fn enable_ansi_translation() -> bool {
    match colored::control::set_virtual_terminal(true) {
        Ok(()) => true,
        Err(()) => {
            tracing::debug!("virtual terminal processing unavailable; writing plain traces");
            false
        }
    }
}

#[cfg(not(all(windows, feature = "console")))]
fn enable_ansi_translation() -> bool {
    true
}
