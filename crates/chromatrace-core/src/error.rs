//! Error types for Chromatrace Core.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for building and running the colorizer.
#[derive(Error, Debug)]
pub enum HookError {
    /// The crate was built without a highlighting engine.
    #[error("syntax engine not available")]
    EngineUnavailable,

    /// The embedded trace grammar could not be loaded.
    #[error("Failed to load trace grammar: {0}")]
    Grammar(String),

    /// A style name that matches neither an alias nor a theme.
    #[error("Style not found: {0}")]
    UnknownStyle(String),

    /// A custom theme file could not be loaded.
    #[error("Failed to load theme file {path}: {message}")]
    ThemeFile {
        /// Path that was requested
        path: PathBuf,
        /// Loader message
        message: String,
    },

    /// I/O errors while writing to the error stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Chromatrace operations.
pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_unavailable_message() {
        let err = HookError::EngineUnavailable;
        assert_eq!(err.to_string(), "syntax engine not available");
    }

    #[test]
    fn test_hook_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: HookError = io_err.into();
        match err {
            HookError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_unknown_style_message() {
        let err = HookError::UnknownStyle("nope".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Style not found"));
        assert!(msg.contains("nope"));
    }

    #[test]
    fn test_theme_file_message() {
        let err = HookError::ThemeFile {
            path: PathBuf::from("/tmp/x.tmTheme"),
            message: "bad plist".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x.tmTheme"));
        assert!(msg.contains("bad plist"));
    }
}
