//! The four public codec entry points.
//!
//! All of them share one failure surface: on any error the destination
//! buffer is cleared and overwritten with a human-readable message followed
//! by a single `0x00`, and the function returns `false`. A caller never
//! sees partially written output.

use alloc::format;

use crate::binary_reader::read_binary;
use crate::binary_writer::BinaryWriter;
use crate::buffer::Buffer;
use crate::error::Error;
use crate::parser::parse;
use crate::text::{TextOptions, TextWriter};
use crate::visitor::{VisitResult, Visitor};

/// Discards every event; parsing into it is pure validation.
struct ValidationSink;

impl Visitor for ValidationSink {
    fn push_label(&mut self, _label: &[u8]) -> VisitResult {
        Ok(())
    }
    fn start_object(&mut self) -> VisitResult {
        Ok(())
    }
    fn end_object(&mut self) -> VisitResult {
        Ok(())
    }
    fn start_array(&mut self) -> VisitResult {
        Ok(())
    }
    fn end_array(&mut self) -> VisitResult {
        Ok(())
    }
    fn add_bool(&mut self, _value: bool) -> VisitResult {
        Ok(())
    }
    fn add_number(&mut self, _lexeme: &[u8]) -> VisitResult {
        Ok(())
    }
    fn add_string(&mut self, _value: &[u8]) -> VisitResult {
        Ok(())
    }
    fn add_null(&mut self) -> VisitResult {
        Ok(())
    }
    fn add_undefined(&mut self) -> VisitResult {
        Ok(())
    }
}

/// Replaces whatever is in `dest` with the error message and trailing NUL.
fn fail(dest: &mut Buffer, error: &Error) -> bool {
    dest.clear();
    let message = format!("Error: {error}");
    // Nothing sensible is left to do if even the message cannot be stored.
    let _ = dest.append(message.as_bytes());
    let _ = dest.append_byte(0);
    false
}

fn finish(dest: &mut Buffer, result: Result<(), Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => fail(dest, &error),
    }
}

/// Checks whether `source` is a well-formed JSON text, materializing
/// nothing.
#[must_use]
pub fn validate_json(source: &[u8]) -> bool {
    parse(source, &mut ValidationSink).is_ok()
}

/// Parses JSON text and re-emits it as JSON text, compact or indented per
/// `options`. Returns `false` with an error message in `dest` on failure.
pub fn transcode_json_to_json(source: &[u8], dest: &mut Buffer, options: &TextOptions) -> bool {
    let result = {
        let mut writer = TextWriter::new(dest, options);
        parse(source, &mut writer)
    };
    finish(dest, result)
}

/// Parses JSON text and emits the length-prefixed binary form. Returns
/// `false` with an error message in `dest` on failure.
pub fn transcode_json_to_binary(source: &[u8], dest: &mut Buffer) -> bool {
    let result = {
        let mut writer = BinaryWriter::new(dest);
        parse(source, &mut writer)
    };
    finish(dest, result)
}

/// Reads the binary form and emits JSON text per `options`. Returns
/// `false` with an error message in `dest` on failure.
pub fn transcode_binary_to_json(source: &[u8], dest: &mut Buffer, options: &TextOptions) -> bool {
    let result = {
        let mut writer = TextWriter::new(dest, options);
        read_binary(source, &mut writer)
    };
    finish(dest, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_and_rejects() {
        assert!(validate_json(b"{\"a\":[1,2.5,null,true]}"));
        assert!(validate_json(b"undefined"));
        assert!(!validate_json(b"{\"a\":}"));
        assert!(!validate_json(b""));
        assert!(!validate_json(b"1 2"));
    }

    #[test]
    fn failure_clears_partial_output() {
        let mut dest = Buffer::new();
        // The object parses (and writes) some way in before failing.
        assert!(!transcode_json_to_binary(b"{\"a\":1,\"b\":", &mut dest));
        let out = dest.as_slice();
        assert!(out.starts_with(b"Error: "));
        assert_eq!(out.last(), Some(&0u8));
    }

    #[test]
    fn error_message_names_token_and_position() {
        let mut dest = Buffer::new();
        assert!(!transcode_json_to_json(
            b"{\"\":\"\",}",
            &mut dest,
            &TextOptions::default()
        ));
        let message = core::str::from_utf8(dest.as_slice()).unwrap();
        assert_eq!(
            message,
            "Error: expected object label (got RIGHT BRACE) at 1:8\0"
        );
    }

    #[test]
    fn binary_failures_use_the_same_surface() {
        let mut dest = Buffer::new();
        assert!(!transcode_binary_to_json(
            &[0xa0],
            &mut dest,
            &TextOptions::default()
        ));
        let message = core::str::from_utf8(dest.as_slice()).unwrap();
        assert_eq!(message, "Error: unknown type code 5\0");
    }
}
