//! Error types for sheet parsing.

use thiserror::Error;

/// Errors produced while parsing a sheet file.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A line could not be tokenized (unterminated quote, missing `=`).
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A numeric attribute failed to parse.
    #[error("line {line}: attribute {attr}=\"{value}\" is not a valid number")]
    BadNumber {
        /// 1-based line number.
        line: usize,
        /// Attribute name.
        attr: &'static str,
        /// Raw attribute value.
        value: String,
    },

    /// A required attribute was missing from a line.
    #[error("line {line}: {keyword} line is missing attribute \"{attr}\"")]
    MissingAttribute {
        /// 1-based line number.
        line: usize,
        /// Line keyword (`animation`, `frame`, `point`).
        keyword: &'static str,
        /// Attribute name.
        attr: &'static str,
    },

    /// A `frame` line appeared before any `animation` line.
    #[error("line {line}: frame outside of an animation block")]
    OrphanFrame {
        /// 1-based line number.
        line: usize,
    },

    /// A `point` line appeared before any `frame` line.
    #[error("line {line}: point outside of a frame")]
    OrphanPoint {
        /// 1-based line number.
        line: usize,
    },

    /// An unrecognized line keyword.
    #[error("line {line}: unknown keyword \"{keyword}\"")]
    UnknownKeyword {
        /// 1-based line number.
        line: usize,
        /// The offending keyword.
        keyword: String,
    },
}
