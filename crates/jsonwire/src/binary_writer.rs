//! The length-prefixed binary form as a [`Visitor`] implementation.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::VisitError;
use crate::escape::append_modified_utf8z;
use crate::visitor::{VisitResult, Visitor};
use crate::wire::{
    LENGTH_CONT, RESERVE_LENGTH, SS_FALSE, SS_NULL, SS_PREFIX, SS_TRUE, SS_UNDEFINED, TYPE_ARRAY,
    TYPE_NUMBER, TYPE_OBJECT, TYPE_SHIFT, TYPE_STRING, length_tail, write_type_length,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    /// Offset of the reserved type-and-length header.
    start: usize,
    members: u32,
}

/// Emits the binary form into a growable buffer.
///
/// A compound reserves `1 + RESERVE_LENGTH` header bytes when it starts
/// and backpatches the real length when it ends, shifting the payload only
/// when the reserved guess was wrong. The root accepts exactly one
/// top-level value.
pub struct BinaryWriter<'buf> {
    dest: &'buf mut Buffer,
    stack: Vec<Frame>,
}

impl<'buf> BinaryWriter<'buf> {
    pub fn new(dest: &'buf mut Buffer) -> Self {
        let mut stack = Vec::with_capacity(8);
        stack.push(Frame {
            kind: FrameKind::Root,
            start: 0,
            members: 0,
        });
        Self { dest, stack }
    }

    fn introduce_value(&mut self) -> VisitResult {
        let top = self.stack.last_mut().ok_or(VisitError::IllegalSequence)?;
        if top.kind == FrameKind::Root && top.members > 0 {
            return Err(VisitError::IllegalSequence);
        }
        top.members += 1;
        Ok(())
    }

    fn start_compound(&mut self, kind: FrameKind) -> VisitResult {
        self.introduce_value()?;
        let start = self.dest.pos();
        self.dest.skip(1 + RESERVE_LENGTH)?;
        self.stack.push(Frame {
            kind,
            start,
            members: 0,
        });
        Ok(())
    }

    fn end_compound(&mut self, kind: FrameKind, ty: u8) -> VisitResult {
        let Some(top) = self.stack.pop() else {
            return Err(VisitError::IllegalSequence);
        };
        if top.kind != kind || self.stack.is_empty() {
            return Err(VisitError::IllegalSequence);
        }
        self.finalize(ty, top.start)
    }

    /// Backpatches the reserved header once the payload size is known,
    /// moving the payload when the length needs more or fewer bytes than
    /// were reserved.
    fn finalize(&mut self, ty: u8, start: usize) -> VisitResult {
        let payload_start = start + 1 + RESERVE_LENGTH;
        let actual = self.dest.pos() - payload_start;
        let actual32 = u32::try_from(actual).map_err(|_| VisitError::LengthOverflow)?;

        // Zero-length fast path: rewind to a lone header byte.
        if actual == 0 {
            self.dest.truncate(start);
            self.dest.append_byte(ty << TYPE_SHIFT)?;
            return Ok(());
        }

        let nibble = (actual32 & 0x0f) as u8;
        let rest = actual32 >> 4;

        if rest == 0 {
            // Length fits the header nibble; the reserved bytes go away.
            self.dest.write_at(start, &[(ty << TYPE_SHIFT) | nibble])?;
            self.dest
                .copy_within(payload_start..payload_start + actual, start + 1)?;
            self.dest.truncate(start + 1 + actual);
            return Ok(());
        }

        let (bytes, n) = length_tail(rest);
        self.dest
            .write_at(start, &[(ty << TYPE_SHIFT) | nibble | LENGTH_CONT])?;
        if n != RESERVE_LENGTH {
            self.dest
                .copy_within(payload_start..payload_start + actual, start + 1 + n)?;
            self.dest.truncate(start + 1 + n + actual);
        }
        self.dest.write_at(start + 1, &bytes[..n])?;
        Ok(())
    }

    fn simple_scalar(&mut self, data: u8) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(&[SS_PREFIX, data])?;
        Ok(())
    }

    fn sized_value(&mut self, ty: u8, payload: &[u8]) -> VisitResult {
        self.introduce_value()?;
        let length = u32::try_from(payload.len()).map_err(|_| VisitError::LengthOverflow)?;
        write_type_length(self.dest, ty, length)?;
        self.dest.append(payload)?;
        Ok(())
    }
}

impl Visitor for BinaryWriter<'_> {
    fn push_label(&mut self, label: &[u8]) -> VisitResult {
        let top = self.stack.last().ok_or(VisitError::IllegalSequence)?;
        if top.kind != FrameKind::Object {
            return Err(VisitError::IllegalSequence);
        }
        append_modified_utf8z(self.dest, label)?;
        Ok(())
    }

    fn start_object(&mut self) -> VisitResult {
        self.start_compound(FrameKind::Object)
    }

    fn end_object(&mut self) -> VisitResult {
        self.end_compound(FrameKind::Object, TYPE_OBJECT)
    }

    fn start_array(&mut self) -> VisitResult {
        self.start_compound(FrameKind::Array)
    }

    fn end_array(&mut self) -> VisitResult {
        self.end_compound(FrameKind::Array, TYPE_ARRAY)
    }

    fn add_empty_object(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append_byte(TYPE_OBJECT << TYPE_SHIFT)?;
        Ok(())
    }

    fn add_empty_array(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append_byte(TYPE_ARRAY << TYPE_SHIFT)?;
        Ok(())
    }

    fn add_bool(&mut self, value: bool) -> VisitResult {
        self.simple_scalar(if value { SS_TRUE } else { SS_FALSE })
    }

    fn add_number(&mut self, lexeme: &[u8]) -> VisitResult {
        self.sized_value(TYPE_NUMBER, lexeme)
    }

    fn add_string(&mut self, value: &[u8]) -> VisitResult {
        self.sized_value(TYPE_STRING, value)
    }

    fn add_null(&mut self) -> VisitResult {
        self.simple_scalar(SS_NULL)
    }

    fn add_undefined(&mut self) -> VisitResult {
        self.simple_scalar(SS_UNDEFINED)
    }
}
