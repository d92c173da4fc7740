//! Trace grammar registry.
//!
//! Loads the embedded `Rust Trace` sublime-syntax definition into a syntect
//! `SyntaxSet`. The grammar only assigns scopes; lexing and matching are
//! done by syntect.

use crate::error::{HookError, Result};
use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet, SyntaxSetBuilder};

/// Name of the embedded trace syntax.
pub const TRACE_SYNTAX_NAME: &str = "Rust Trace";

const TRACE_GRAMMAR: &str = include_str!("rust-trace.sublime-syntax");

/// Registry holding the trace grammar and a plain-text fallback.
pub struct TraceSyntax {
    syntax_set: SyntaxSet,
}

impl TraceSyntax {
    /// Load the embedded grammar.
    pub fn load() -> Result<Self> {
        let definition = SyntaxDefinition::load_from_str(TRACE_GRAMMAR, true, None)
            .map_err(|e| HookError::Grammar(e.to_string()))?;

        let mut builder = SyntaxSetBuilder::new();
        builder.add_plain_text_syntax();
        builder.add(definition);

        Ok(Self { syntax_set: builder.build() })
    }

    /// Get the syntax set for syntect operations.
    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }

    /// The trace syntax, or plain text if it is somehow missing.
    pub fn trace_syntax(&self) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_name(TRACE_SYNTAX_NAME)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_loads() {
        let grammar = TraceSyntax::load().unwrap();
        assert_eq!(grammar.trace_syntax().name, TRACE_SYNTAX_NAME);
    }

    #[test]
    fn test_plain_text_available() {
        let grammar = TraceSyntax::load().unwrap();
        assert!(grammar.syntax_set().find_syntax_by_name("Plain Text").is_some());
    }

    #[test]
    fn test_lookup_by_extension() {
        let grammar = TraceSyntax::load().unwrap();
        let syntax = grammar.syntax_set().find_syntax_by_extension("rstrace");
        assert!(syntax.is_some());
    }
}
