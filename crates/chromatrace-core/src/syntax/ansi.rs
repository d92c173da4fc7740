//! Styled text and its rendering as ANSI escape sequences.

use crate::terminal::{ColorSupport, foreground_sgr};

/// A styled span of text with color information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// The text content
    pub text: String,
    /// RGB foreground, `None` for the terminal's default
    pub foreground: Option<(u8, u8, u8)>,
    /// Whether text should be bold
    pub bold: bool,
    /// Whether text should be italic
    pub italic: bool,
    /// Whether text should be underlined
    pub underline: bool,
}

impl StyledSpan {
    /// An unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), foreground: None, bold: false, italic: false, underline: false }
    }

    fn sgr_params(&self, support: ColorSupport) -> Vec<String> {
        let mut params = Vec::new();
        if self.bold {
            params.push("1".to_string());
        }
        if self.italic {
            params.push("3".to_string());
        }
        if self.underline {
            params.push("4".to_string());
        }
        if let Some(rgb) = self.foreground {
            params.push(foreground_sgr(rgb, support));
        }
        params
    }
}

/// A line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    /// The styled spans that make up this line
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// A line holding a single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { spans: vec![StyledSpan::plain(text)] }
    }
}

/// Render styled lines as text with SGR escape sequences.
///
/// Every styled run is closed with a reset before any line break, so a
/// truncated or interleaved write never leaves the terminal colored.
pub fn render(lines: &[StyledLine], support: ColorSupport) -> String {
    let mut out = String::new();
    for line in lines {
        for span in &line.spans {
            push_span(&mut out, span, support);
        }
    }
    out
}

fn push_span(out: &mut String, span: &StyledSpan, support: ColorSupport) {
    let (body, line_break) = match span.text.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (span.text.as_str(), ""),
    };

    let params = span.sgr_params(support);
    if params.is_empty() || body.is_empty() {
        out.push_str(body);
    } else {
        out.push_str("\x1b[");
        out.push_str(&params.join(";"));
        out.push('m');
        out.push_str(body);
        out.push_str("\x1b[0m");
    }
    out.push_str(line_break);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colored(text: &str, rgb: (u8, u8, u8)) -> StyledSpan {
        StyledSpan { foreground: Some(rgb), ..StyledSpan::plain(text) }
    }

    #[test]
    fn test_plain_spans_have_no_escapes() {
        let lines = vec![StyledLine::plain("hello\n"), StyledLine::plain("world")];
        assert_eq!(render(&lines, ColorSupport::Truecolor), "hello\nworld");
    }

    #[test]
    fn test_truecolor_span() {
        let lines = vec![StyledLine { spans: vec![colored("42", (255, 0, 0))] }];
        assert_eq!(render(&lines, ColorSupport::Truecolor), "\x1b[38;2;255;0;0m42\x1b[0m");
    }

    #[test]
    fn test_reset_precedes_line_break() {
        let lines = vec![StyledLine { spans: vec![colored("boom\n", (255, 0, 0))] }];
        assert_eq!(render(&lines, ColorSupport::Color16), "\x1b[91mboom\x1b[0m\n");
    }

    #[test]
    fn test_font_styles_combined() {
        let span = StyledSpan { bold: true, underline: true, ..colored("x", (255, 0, 0)) };
        let out = render(&[StyledLine { spans: vec![span] }], ColorSupport::Color256);
        assert_eq!(out, "\x1b[1;4;38;5;196mx\x1b[0m");
    }

    #[test]
    fn test_bare_newline_span() {
        let lines = vec![StyledLine { spans: vec![colored("\n", (1, 2, 3))] }];
        assert_eq!(render(&lines, ColorSupport::Truecolor), "\n");
    }
}
