//! Error types for every stage of the codec.
//!
//! Internal APIs return these through `Result`; the public transcode entry
//! points flatten them into the destination-buffer message surface.

use bstr::BString;
use thiserror::Error;

use crate::lexer::Token;

/// The allocator refused to grow a [`Buffer`](crate::Buffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("out of memory")]
pub struct OutOfMemory;

/// Lexical errors surfaced while tokenizing JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// Unterminated string, raw control byte, or bad escape sequence.
    #[error("bad escape sequence or control byte in string")]
    IllegalString,
    /// A byte with no character class (for example a stray `#`).
    #[error("unrecognized character in input")]
    UnknownChar,
}

/// Grammatical errors from the recursive-descent parser.
///
/// Each variant carries the offending token so messages read like
/// `expected colon (got RIGHT BRACE)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected legal value (got {0})")]
    ExpectedValue(Token),
    #[error("expected object label (got {0})")]
    ExpectedLabel(Token),
    #[error("expected colon (got {0})")]
    ExpectedColon(Token),
    #[error("expected next object field or end of object (got {0})")]
    ExpectedCommaOrCloseObject(Token),
    #[error("expected end of array or additional element (got {0})")]
    ExpectedCommaOrCloseArray(Token),
    #[error("expected end of input (got {0})")]
    ExpectedEof(Token),
    /// An identifier value other than `null`, `true`, `false`, `undefined`.
    #[error("expected true/false/null/undefined identifier (got '{0}')")]
    UnknownIdentifier(BString),
}

/// Malformed input to the binary reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BinaryError {
    /// A header, label, or payload runs past the end of the input.
    #[error("truncated value")]
    Truncated,
    /// Type codes 5 (typed string), 6 (small binary), and 7 (reserved) are
    /// defined by the wire format but carry no JSON value.
    #[error("unknown type code {0}")]
    UnknownType(u8),
    /// A simple scalar whose payload is not exactly one byte in `0..=3`.
    #[error("malformed simple scalar")]
    MalformedScalar,
    /// More length-continuation bytes than a 32-bit length can hold.
    #[error("length continuation overflows 32 bits")]
    LengthOverflow,
}

/// Errors raised by a [`Visitor`](crate::Visitor) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VisitError {
    /// Events arrived in an order no parse can produce, such as a label
    /// outside an object or an unbalanced end.
    #[error("illegal visitor call sequence")]
    IllegalSequence,
    #[error("out of memory")]
    OutOfMemory,
    /// A single value longer than the 32-bit wire length limit.
    #[error("value length exceeds the 32-bit wire limit")]
    LengthOverflow,
}

impl From<OutOfMemory> for VisitError {
    fn from(_: OutOfMemory) -> Self {
        Self::OutOfMemory
    }
}

/// A lexical or grammatical error in JSON text input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Any failure a transcode can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad JSON text, with the 1-based position of the offending token.
    #[error("{source} at {line}:{column}")]
    Syntax {
        source: SyntaxError,
        line: u32,
        column: u32,
    },
    /// Bad binary input.
    #[error(transparent)]
    Binary(#[from] BinaryError),
    /// A visitor rejected the event stream.
    #[error(transparent)]
    Visit(#[from] VisitError),
}

impl Error {
    pub(crate) fn syntax(source: impl Into<SyntaxError>, position: (u32, u32)) -> Self {
        Self::Syntax {
            source: source.into(),
            line: position.0,
            column: position.1,
        }
    }
}

impl From<OutOfMemory> for Error {
    fn from(err: OutOfMemory) -> Self {
        Self::Visit(err.into())
    }
}
