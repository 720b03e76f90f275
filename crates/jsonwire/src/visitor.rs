//! The event contract binding the two parsers to the two writers.

use alloc::string::ToString;

use crate::error::VisitError;

/// Result of delivering one event to a visitor.
pub type VisitResult = Result<(), VisitError>;

/// Depth-first traversal events over a JSON-like value.
///
/// Both the text parser and the binary reader drive this interface, and the
/// JSON text writer, the binary writer, and the validation sink implement
/// it. That single contract is what makes the transcoders interchangeable.
///
/// Inside an object, [`push_label`](Visitor::push_label) must precede each
/// value event. Label and string bytes are borrowed from the caller's
/// scratch and are only valid for the duration of the call.
pub trait Visitor {
    /// Declares the label of the next value stored in the enclosing object.
    fn push_label(&mut self, label: &[u8]) -> VisitResult;

    /// Starts an object value. Must be balanced by
    /// [`end_object`](Visitor::end_object).
    fn start_object(&mut self) -> VisitResult;

    fn end_object(&mut self) -> VisitResult;

    /// Starts an array value. Must be balanced by
    /// [`end_array`](Visitor::end_array).
    fn start_array(&mut self) -> VisitResult;

    fn end_array(&mut self) -> VisitResult;

    /// A zero-member object, equivalent to an immediate start/end pair.
    /// Writers override this with a cheaper form where the wire allows one.
    fn add_empty_object(&mut self) -> VisitResult {
        self.start_object()?;
        self.end_object()
    }

    /// A zero-element array, equivalent to an immediate start/end pair.
    fn add_empty_array(&mut self) -> VisitResult {
        self.start_array()?;
        self.end_array()
    }

    fn add_bool(&mut self, value: bool) -> VisitResult;

    fn add_int32(&mut self, value: i32) -> VisitResult {
        self.add_number(value.to_string().as_bytes())
    }

    fn add_int64(&mut self, value: i64) -> VisitResult {
        self.add_number(value.to_string().as_bytes())
    }

    fn add_double(&mut self, value: f64) -> VisitResult {
        self.add_number(value.to_string().as_bytes())
    }

    /// A numeric value as its verbatim source lexeme. Parsers forward
    /// number tokens here untouched, which is what keeps the codec lossless
    /// across the full precision of source numbers.
    fn add_number(&mut self, lexeme: &[u8]) -> VisitResult;

    /// A string value as raw UTF-8 bytes, escapes already decoded.
    fn add_string(&mut self, value: &[u8]) -> VisitResult;

    fn add_null(&mut self) -> VisitResult;

    fn add_undefined(&mut self) -> VisitResult;
}
