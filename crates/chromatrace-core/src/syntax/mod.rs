//! Syntax highlighting support for trace text.
//!
//! Provides trace highlighting using syntect with an embedded grammar for
//! panic messages, backtraces and error chains, plus ANSI rendering of the
//! styled result.

pub mod ansi;
#[cfg(feature = "syntax")]
pub mod grammar;
#[cfg(feature = "syntax")]
pub mod highlighter;
#[cfg(feature = "syntax")]
pub mod theme_adapter;

pub use ansi::{StyledLine, StyledSpan, render};
#[cfg(feature = "syntax")]
pub use grammar::TraceSyntax;
#[cfg(feature = "syntax")]
pub use highlighter::SyntaxHighlighter;
#[cfg(feature = "syntax")]
pub use theme_adapter::{STYLE_ALIASES, ThemeAdapter};
