//! Bidirectional transcoding between JSON text and a compact,
//! length-prefixed binary form.
//!
//! Three transcoders share one event contract, the [`Visitor`] trait: the
//! text parser and the binary reader drive it, and the JSON text writer,
//! the binary writer, and a validation sink implement it. Numeric lexemes
//! travel verbatim in both directions, so the codec is lossless across the
//! full precision of source numbers.
//!
//! ```
//! use jsonwire::{Buffer, TextOptions, transcode_binary_to_json, transcode_json_to_binary};
//!
//! let mut binary = Buffer::new();
//! assert!(transcode_json_to_binary(b"[]", &mut binary));
//! assert_eq!(binary.as_slice(), &[0x20]);
//!
//! let mut text = Buffer::new();
//! assert!(transcode_binary_to_json(
//!     binary.as_slice(),
//!     &mut text,
//!     &TextOptions::default()
//! ));
//! assert_eq!(text.as_slice(), b"[]");
//! ```
//!
//! On failure the entry points return `false` and leave a NUL-terminated
//! message in the destination buffer; partially written output is never
//! observable.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod binary_reader;
mod binary_writer;
mod buffer;
mod error;
mod escape;
mod lexer;
mod parser;
mod text;
mod transcode;
mod visitor;
mod wire;

pub use binary_reader::read_binary;
pub use binary_writer::BinaryWriter;
pub use buffer::Buffer;
pub use error::{
    BinaryError, Error, LexError, OutOfMemory, ParseError, SyntaxError, VisitError,
};
pub use escape::EscapeMode;
pub use lexer::Token;
pub use parser::parse;
pub use text::{TextOptions, TextWriter};
pub use transcode::{
    transcode_binary_to_json, transcode_json_to_binary, transcode_json_to_json, validate_json,
};
pub use visitor::{VisitResult, Visitor};
