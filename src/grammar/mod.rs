//! Harte grammar — text → tokens → parse tree → descriptor.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod transform;

pub use ast::*;
pub use transform::to_descriptor;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::chord::{self, CanonicalDegreeSet, Chord, ChordDescriptor, ShorthandTable};
use crate::error::HarteError;
use lexer::Lexer;
use parser::Parser;

/// The reserved "no chord" symbol.
pub const NO_CHORD: &str = "N";

static DEFAULT_PARSER: Lazy<HarteParser> = Lazy::new(HarteParser::new);

/// The Harte parser.
///
/// Holds the shorthand table the resolver and prettifier share. Immutable
/// once built, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct HarteParser {
    table: Arc<ShorthandTable>,
    trim_input: bool,
}

impl HarteParser {
    /// A parser over the built-in shorthand table.
    pub fn new() -> Self {
        Self::with_table(ShorthandTable::default())
    }

    pub fn with_table(table: ShorthandTable) -> Self {
        Self {
            table: Arc::new(table),
            trim_input: true,
        }
    }

    /// The lazily built default parser.
    pub fn global() -> &'static HarteParser {
        &DEFAULT_PARSER
    }

    /// Strip surrounding whitespace before parsing (on by default). Without
    /// it, only the exact text `N` is read as no chord.
    pub fn trim_input(mut self, trim: bool) -> Self {
        self.trim_input = trim;
        self
    }

    pub fn table(&self) -> &ShorthandTable {
        &self.table
    }

    /// The text the parser actually reads: `text`, trimmed unless
    /// `trim_input` is off.
    fn source<'t>(&self, text: &'t str) -> &'t str {
        if self.trim_input {
            text.trim()
        } else {
            text
        }
    }

    /// Parse text into a tree.
    pub fn parse_tree(&self, text: &str) -> Result<ChordTree, HarteError> {
        let source = self.source(text);
        if source == NO_CHORD {
            return Ok(ChordTree::NoChord);
        }
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        let mut parser = Parser::new(source, tokens);
        let tree = parser.parse()?;
        tracing::trace!(input = source, ?tree, "parsed chord");
        Ok(tree)
    }

    /// Parse text into a descriptor.
    pub fn parse(&self, text: &str) -> Result<ChordDescriptor, HarteError> {
        to_descriptor(&self.parse_tree(text)?, self.source(text))
    }

    /// Resolve a descriptor against this parser's table.
    pub fn resolve(&self, descriptor: &ChordDescriptor) -> Result<CanonicalDegreeSet, HarteError> {
        chord::resolve(descriptor, &self.table)
    }

    /// Parse and resolve in one step.
    pub fn degrees(&self, text: &str) -> Result<CanonicalDegreeSet, HarteError> {
        self.resolve(&self.parse(text)?)
    }

    /// Parse text into a [`Chord`] sharing this parser's table.
    pub fn chord(&self, text: &str) -> Result<Chord, HarteError> {
        Chord::new(self.parse(text)?, Arc::clone(&self.table))
    }

    /// The shortest Harte string equivalent to `text`.
    pub fn prettify(&self, text: &str) -> Result<String, HarteError> {
        self.chord(text)?.prettify()
    }

    /// Normalize one line of a chord file. Blank lines and `N` come back
    /// as read; anything else is prettified. Surrounding whitespace follows
    /// `trim_input`.
    pub fn normalize_line(&self, line: &str) -> Result<String, HarteError> {
        let source = self.source(line);
        if source.is_empty() || source == NO_CHORD {
            return Ok(source.to_string());
        }
        self.prettify(source)
    }
}

impl Default for HarteParser {
    fn default() -> Self {
        Self::new()
    }
}
