//! Syntax highlighter using syntect.
//!
//! Hands trace text to syntect with the embedded trace grammar and a
//! theme, and converts the result to styled lines.

use crate::error::Result;
use crate::syntax::ansi::{StyledLine, StyledSpan};
use crate::syntax::grammar::TraceSyntax;
use crate::syntax::theme_adapter::ThemeAdapter;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme};
use syntect::util::LinesWithEndings;

/// Syntax highlighter for trace text.
pub struct SyntaxHighlighter {
    grammar: TraceSyntax,
    themes: ThemeAdapter,
}

impl SyntaxHighlighter {
    /// Load the trace grammar and the bundled themes.
    pub fn new() -> Result<Self> {
        Ok(Self { grammar: TraceSyntax::load()?, themes: ThemeAdapter::new() })
    }

    /// Themes available to this highlighter.
    pub fn themes(&self) -> &ThemeAdapter {
        &self.themes
    }

    /// Highlight trace text with the given theme.
    ///
    /// Lines keep their line endings. A line syntect fails on is returned
    /// unstyled; highlighting continues with the next line.
    pub fn highlight(&self, text: &str, theme: &Theme) -> Vec<StyledLine> {
        let syntax_set = self.grammar.syntax_set();
        let mut highlighter = HighlightLines::new(self.grammar.trace_syntax(), theme);
        let default_fg = ThemeAdapter::foreground_color(theme).map(ThemeAdapter::color_to_rgb);

        let mut styled_lines = Vec::new();

        for line in LinesWithEndings::from(text) {
            match highlighter.highlight_line(line, syntax_set) {
                Ok(highlighted) => {
                    let spans = highlighted
                        .into_iter()
                        .map(|(style, text)| style_to_span(style, text, default_fg))
                        .collect();
                    styled_lines.push(StyledLine { spans });
                }
                Err(e) => {
                    tracing::debug!("highlighting failed, using plain text: {}", e);
                    styled_lines.push(StyledLine::plain(line));
                }
            }
        }

        styled_lines
    }
}

/// Convert syntect Style to StyledSpan.
///
/// The theme's own text color maps to `None` so unscoped text keeps the
/// terminal's default color.
fn style_to_span(style: Style, text: &str, default_fg: Option<(u8, u8, u8)>) -> StyledSpan {
    let fg = ThemeAdapter::color_to_rgb(style.foreground);

    StyledSpan {
        text: text.to_string(),
        foreground: if Some(fg) == default_fg { None } else { Some(fg) },
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}
