use alloc::string::String;
use thiserror::Error;

use crate::dispatch::ObserverError;

/// Errors surfaced by [`SaxParser::parse`](crate::SaxParser::parse).
///
/// Every error is reported to the immediate caller; the parser performs no
/// silent recovery and never repairs well-formedness violations. After a
/// [`MalformedXml`](SaxError::MalformedXml) error the parser state is left
/// as-is — callers may inspect it but should treat the instance as unusable
/// for further parsing.
#[derive(Error, Debug)]
pub enum SaxError {
    /// The chunk passed to `parse` is not UTF-8 text.
    ///
    /// `offset` is the position of the offending byte within the rejected
    /// chunk. The chunk is rejected as a whole: no state is mutated and no
    /// notifications are dispatched. A chunk that merely *ends* in the middle
    /// of a multi-byte scalar is fine — the partial scalar is carried over to
    /// the next call.
    #[error("invalid argument: input is not UTF-8 text (invalid byte at offset {offset})")]
    InvalidArgument {
        /// Byte offset of the first invalid byte within the rejected chunk.
        offset: usize,
    },

    /// The input is not well-formed XML.
    ///
    /// Notifications dispatched before the error was detected stand; they are
    /// not retracted.
    #[error("malformed XML at {line}:{column}: {source}")]
    MalformedXml {
        /// The specific well-formedness violation.
        source: SyntaxError,
        /// Line on which the violation was detected (1-based).
        line: usize,
        /// Column on which the violation was detected (1-based).
        column: usize,
    },

    /// `parse` was called after [`close`](crate::SaxParser::close).
    #[error("parser used after close")]
    UseAfterClose,

    /// An observer returned an error during dispatch.
    ///
    /// Dispatch for the current chunk is aborted; the failure is not caught
    /// or suppressed by the parser.
    #[error("observer error: {0}")]
    Observer(ObserverError),
}

/// The specific cause of a [`SaxError::MalformedXml`] error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// A character that is not valid at the current position.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    /// A close tag that does not match the innermost open element.
    #[error("mismatched close tag: expected </{expected}>, found </{found}>")]
    MismatchedCloseTag {
        /// Name of the innermost open element.
        expected: String,
        /// Name found in the close tag.
        found: String,
    },

    /// A close tag with no open element at all.
    #[error("close tag </{0}> with no open element")]
    StrayCloseTag(String),

    /// A reference to an entity this parser does not define.
    ///
    /// Only the five predefined entities are recognized; general entities
    /// would require DTD processing.
    #[error("unknown entity &{0};")]
    UnknownEntity(String),

    /// A numeric character reference that is not a valid XML character.
    #[error("invalid character reference")]
    InvalidCharacterReference,

    /// The same attribute name appeared twice in one tag.
    #[error("duplicate attribute {0:?}")]
    DuplicateAttribute(String),

    /// `--` inside a comment, which XML forbids.
    #[error("'--' is not permitted inside a comment")]
    DoubleHyphenInComment,
}
