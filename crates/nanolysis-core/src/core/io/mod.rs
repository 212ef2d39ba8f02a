//! Provides the text codec for the two on-disk formats the engine understands.
//!
//! - [`origin`] reads the tab-separated origin file that assigns every bead to a chain.
//! - [`dump`] reads a per-timestep snapshot and writes reduced snapshots back in the
//!   same layout.
//!
//! Both readers share the [`traits::FormatReader`] interface and the error type
//! defined here.

pub mod dump;
pub mod origin;
pub mod traits;

use serde::Deserialize;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Delimited record error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("Header is truncated: expected {expected} lines, found {found}")]
    TruncatedHeader { expected: usize, found: usize },

    #[error("Header declares {declared} atoms but {found} bead rows were read")]
    AtomCountMismatch { declared: usize, found: usize },

    #[error("Duplicate bead id: {0}")]
    DuplicateBead(u64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },

    #[error("Invalid real in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },

    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Missing token for field '{field}'")]
    MissingToken { field: &'static str },
}

impl FormatError {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { line, kind }
    }
}

/// How raw coordinates of a dump row become absolute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateMode {
    /// Coordinates are used exactly as written.
    #[default]
    Raw,
    /// Coordinates are fractions of the box and are multiplied by the per-axis box
    /// length read from the header.
    ScaledByBox,
}

/// What to do with rows that do not have the arity of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Skip them silently.
    #[default]
    Lenient,
    /// Reject non-blank rows of the wrong arity, duplicate bead ids and a header atom
    /// count that disagrees with the rows read.
    Strict,
}

impl RowPolicy {
    #[inline]
    pub fn is_strict(self) -> bool {
        self == RowPolicy::Strict
    }
}

/// How a dump line is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tokenizer {
    /// Split on every single space; consecutive spaces yield empty tokens.
    #[default]
    SingleSpace,
    /// Split on runs of whitespace.
    Whitespace,
}

impl Tokenizer {
    /// Tokenizes a line after trimming surrounding whitespace.
    pub fn split<'a>(self, line: &'a str) -> Vec<&'a str> {
        let line = line.trim();
        match self {
            Tokenizer::SingleSpace => line.split(' ').collect(),
            Tokenizer::Whitespace => line.split_whitespace().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_space_tokenizer_keeps_empty_tokens() {
        assert_eq!(
            Tokenizer::SingleSpace.split("1  2 3\n"),
            vec!["1", "", "2", "3"]
        );
        assert_eq!(Tokenizer::Whitespace.split("1  2 3\n"), vec!["1", "2", "3"]);
    }

    #[test]
    fn blank_line_is_one_empty_token_in_single_space_mode() {
        assert_eq!(Tokenizer::SingleSpace.split("   "), vec![""]);
        assert!(Tokenizer::Whitespace.split("   ").is_empty());
    }
}
