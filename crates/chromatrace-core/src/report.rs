//! Trace text for panics and escaped errors.
//!
//! The text follows the layout of the standard library's panic handler.
//! Newer toolchains also print a numeric thread id after the thread name;
//! that id is not available to a hook and is left out.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::env;
use std::error::Error;
use std::panic::PanicHookInfo;
use std::thread;

const BACKTRACE_NOTE: &str =
    "note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace";

const SHORT_BACKTRACE_NOTE: &str = "note: Some details are omitted, run with `RUST_BACKTRACE=full` for a verbose backtrace.";

/// How much of the backtrace a panic prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacktraceStyle {
    /// No backtrace, only the `RUST_BACKTRACE=1` note
    Off,
    /// Frames between the short-backtrace markers
    Short,
    /// Every frame
    Full,
}

impl BacktraceStyle {
    /// Style for a `RUST_BACKTRACE` value.
    ///
    /// Unset and `0` disable backtraces, `full` prints every frame and any
    /// other value prints the short form.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            None | Some("0") => Self::Off,
            Some("full") => Self::Full,
            Some(_) => Self::Short,
        }
    }

    /// Style requested through `RUST_BACKTRACE`.
    ///
    /// `RUST_LIB_BACKTRACE` is ignored, as in the standard panic handler.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var("RUST_BACKTRACE").ok().as_deref())
    }

    /// Capture the backtrace of the calling thread in this style.
    pub fn capture(self) -> BacktraceText {
        if self == Self::Off {
            return BacktraceText::Disabled;
        }
        BacktraceText::from_backtrace(&Backtrace::force_capture(), self)
    }
}

/// Backtrace part of a panic report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacktraceText {
    /// Rendered frames
    Captured(String),
    /// Capture disabled through `RUST_BACKTRACE`
    Disabled,
    /// Platform cannot capture backtraces
    Unsupported,
}

impl BacktraceText {
    /// Render a captured backtrace in the given style.
    ///
    /// The short form ends with the note on how to get every frame.
    pub fn from_backtrace(backtrace: &Backtrace, style: BacktraceStyle) -> Self {
        match (backtrace.status(), style) {
            (_, BacktraceStyle::Off) | (BacktraceStatus::Disabled, _) => Self::Disabled,
            (BacktraceStatus::Captured, BacktraceStyle::Full) => {
                Self::Captured(format!("{:#}", backtrace))
            }
            (BacktraceStatus::Captured, BacktraceStyle::Short) => {
                let frames = format!("{}", backtrace);
                Self::Captured(format!("{}\n{}", frames.trim_end(), SHORT_BACKTRACE_NOTE))
            }
            _ => Self::Unsupported,
        }
    }
}

/// Everything printed for one panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicReport {
    /// Name of the panicking thread
    pub thread: String,
    /// Panic payload as text
    pub message: String,
    /// `file:line:column` of the panic
    pub location: Option<String>,
    /// Backtrace frames or the reason there are none
    pub backtrace: BacktraceText,
}

impl PanicReport {
    /// Create a report without location or backtrace.
    pub fn new(thread: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            thread: thread.into(),
            message: message.into(),
            location: None,
            backtrace: BacktraceText::Unsupported,
        }
    }

    /// Set the panic location.
    #[must_use]
    pub fn with_location(mut self, file: &str, line: u32, column: u32) -> Self {
        self.location = Some(format!("{}:{}:{}", file, line, column));
        self
    }

    /// Set the backtrace part.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: BacktraceText) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// Build the report for a panic on the current thread.
    pub fn from_hook_info(info: &PanicHookInfo<'_>, backtrace: BacktraceText) -> Self {
        let thread = thread::current().name().unwrap_or("<unnamed>").to_string();
        let mut report = Self::new(thread, payload_message(info.payload()));

        if let Some(location) = info.location() {
            report = report.with_location(location.file(), location.line(), location.column());
        }

        report.with_backtrace(backtrace)
    }

    /// Render the report in the standard library's layout.
    pub fn render(&self) -> String {
        let mut out = match &self.location {
            Some(location) => format!("thread '{}' panicked at {}:\n", self.thread, location),
            None => format!("thread '{}' panicked:\n", self.thread),
        };

        out.push_str(&self.message);
        out.push('\n');

        match &self.backtrace {
            BacktraceText::Captured(frames) => {
                out.push_str("stack backtrace:\n");
                out.push_str(frames);
                if !frames.ends_with('\n') {
                    out.push('\n');
                }
            }
            BacktraceText::Disabled => {
                out.push_str(BACKTRACE_NOTE);
                out.push('\n');
            }
            BacktraceText::Unsupported => {}
        }

        out
    }
}

/// Panic payload as text; non-string payloads print as `Box<dyn Any>`.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Render an error and its sources the way `anyhow` reports them.
pub fn render_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = format!("Error: {}\n", err);

    let causes: Vec<String> =
        std::iter::successors(err.source(), |&e| e.source()).map(ToString::to_string).collect();

    match causes.as_slice() {
        [] => {}
        [only] => {
            out.push_str("\nCaused by:\n    ");
            out.push_str(only);
            out.push('\n');
        }
        many => {
            out.push_str("\nCaused by:\n");
            for (i, cause) in many.iter().enumerate() {
                out.push_str(&format!("    {}: {}\n", i, cause));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl Error for Layer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.source.as_deref().map(|e| e as &(dyn Error + 'static))
        }
    }

    fn layer(message: &'static str, source: Option<Layer>) -> Layer {
        Layer { message, source: source.map(Box::new) }
    }

    #[test]
    fn test_render_with_disabled_backtrace() {
        let report = PanicReport::new("main", "boom")
            .with_location("src/main.rs", 2, 5)
            .with_backtrace(BacktraceText::Disabled);
        assert_eq!(
            report.render(),
            "thread 'main' panicked at src/main.rs:2:5:\nboom\n\
             note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace\n"
        );
    }

    #[test]
    fn test_render_with_frames() {
        let frames = "   0: app::main\n             at ./src/main.rs:4:13";
        let report = PanicReport::new("worker", "bad state")
            .with_location("src/lib.rs", 10, 1)
            .with_backtrace(BacktraceText::Captured(frames.to_string()));
        let text = report.render();
        assert!(text.starts_with("thread 'worker' panicked at src/lib.rs:10:1:\nbad state\n"));
        assert!(text.contains("stack backtrace:\n   0: app::main\n"));
        assert!(text.ends_with("4:13\n"));
    }

    #[test]
    fn test_render_without_location() {
        let report = PanicReport::new("<unnamed>", "oops");
        assert_eq!(report.render(), "thread '<unnamed>' panicked:\noops\n");
    }

    #[test]
    fn test_backtrace_style_from_env_value() {
        assert_eq!(BacktraceStyle::from_env_value(None), BacktraceStyle::Off);
        assert_eq!(BacktraceStyle::from_env_value(Some("0")), BacktraceStyle::Off);
        assert_eq!(BacktraceStyle::from_env_value(Some("1")), BacktraceStyle::Short);
        assert_eq!(BacktraceStyle::from_env_value(Some("yes")), BacktraceStyle::Short);
        assert_eq!(BacktraceStyle::from_env_value(Some("full")), BacktraceStyle::Full);
    }

    #[test]
    fn test_backtrace_off_is_disabled() {
        assert_eq!(BacktraceStyle::Off.capture(), BacktraceText::Disabled);
        assert_eq!(
            BacktraceText::from_backtrace(&Backtrace::disabled(), BacktraceStyle::Full),
            BacktraceText::Disabled
        );
    }

    #[test]
    fn test_short_backtrace_ends_with_note() {
        // Capture is forced, so RUST_LIB_BACKTRACE=0 cannot hide it.
        match BacktraceStyle::Short.capture() {
            BacktraceText::Captured(frames) => assert!(frames.ends_with(SHORT_BACKTRACE_NOTE)),
            BacktraceText::Unsupported => {}
            BacktraceText::Disabled => panic!("forced capture reported disabled"),
        }
    }

    #[test]
    fn test_full_backtrace_has_no_short_note() {
        if let BacktraceText::Captured(frames) = BacktraceStyle::Full.capture() {
            assert!(!frames.contains(SHORT_BACKTRACE_NOTE));
        }
    }

    #[test]
    fn test_payload_message() {
        let s: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(payload_message(s.as_ref()), "static str");
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(payload_message(owned.as_ref()), "owned");
        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(payload_message(other.as_ref()), "Box<dyn Any>");
    }

    #[test]
    fn test_error_without_sources() {
        let err = layer("config missing", None);
        assert_eq!(render_error_chain(&err), "Error: config missing\n");
    }

    #[test]
    fn test_error_with_single_source() {
        let err = layer("failed to start", Some(layer("port in use", None)));
        assert_eq!(render_error_chain(&err), "Error: failed to start\n\nCaused by:\n    port in use\n");
    }

    #[test]
    fn test_error_with_many_sources() {
        let err = layer("a", Some(layer("b", Some(layer("c", None)))));
        assert_eq!(render_error_chain(&err), "Error: a\n\nCaused by:\n    0: b\n    1: c\n");
    }
}
