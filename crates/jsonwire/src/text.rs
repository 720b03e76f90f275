//! JSON text output as a [`Visitor`] implementation.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::VisitError;
use crate::escape::{EscapeMode, escape_json};
use crate::visitor::{VisitResult, Visitor};

/// Formatting options for JSON text output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions<'a> {
    /// Indent unit for pretty output; `None` produces compact text.
    pub indent: Option<&'a str>,
    /// How non-ASCII string content is rendered.
    pub escape: EscapeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    has_member: bool,
}

/// Emits JSON text (compact or indented) in response to visitor events.
///
/// Values in arrays and at the root introduce their own separator and
/// indentation; inside objects [`push_label`](Visitor::push_label) does, so
/// the label and its value stay on one line.
pub struct TextWriter<'buf, 'opt> {
    dest: &'buf mut Buffer,
    indent: Option<&'opt str>,
    escape: EscapeMode,
    stack: Vec<Frame>,
}

impl<'buf, 'opt> TextWriter<'buf, 'opt> {
    pub fn new(dest: &'buf mut Buffer, options: &TextOptions<'opt>) -> Self {
        let mut stack = Vec::with_capacity(8);
        stack.push(Frame {
            kind: FrameKind::Root,
            has_member: false,
        });
        Self {
            dest,
            indent: options.indent,
            escape: options.escape,
            stack,
        }
    }

    fn top(&mut self) -> Result<&mut Frame, VisitError> {
        self.stack.last_mut().ok_or(VisitError::IllegalSequence)
    }

    /// `\n` plus one indent unit per enclosing compound.
    fn indent_value(&mut self) -> VisitResult {
        let Some(indent) = self.indent else {
            return Ok(());
        };
        let level = self.stack.len() - 1;
        if level == 0 {
            return Ok(());
        }
        self.dest.append_byte(b'\n')?;
        for _ in 0..level {
            self.dest.append(indent.as_bytes())?;
        }
        Ok(())
    }

    /// Newline and indentation for a closing brace or bracket.
    fn outdent(&mut self) -> VisitResult {
        let Some(indent) = self.indent else {
            return Ok(());
        };
        let level = self.stack.len() - 1;
        self.dest.append_byte(b'\n')?;
        for _ in 0..level.saturating_sub(1) {
            self.dest.append(indent.as_bytes())?;
        }
        Ok(())
    }

    /// Separator and indentation before a value in an array or at the
    /// root; object members are introduced by their label instead.
    fn introduce_value(&mut self) -> VisitResult {
        let top = self.stack.last_mut().ok_or(VisitError::IllegalSequence)?;
        let kind = top.kind;
        let has_member = top.has_member;
        top.has_member = true;
        if kind != FrameKind::Object {
            if has_member {
                self.dest.append_byte(b',')?;
            }
            self.indent_value()?;
        }
        Ok(())
    }

    fn pop(&mut self, kind: FrameKind) -> VisitResult {
        if self.stack.len() <= 1 || self.top()?.kind != kind {
            return Err(VisitError::IllegalSequence);
        }
        self.stack.pop();
        Ok(())
    }

    fn quoted(&mut self, bytes: &[u8]) -> VisitResult {
        self.dest.append_byte(b'"')?;
        escape_json(self.dest, bytes, self.escape, false, true)?;
        self.dest.append_byte(b'"')?;
        Ok(())
    }
}

impl Visitor for TextWriter<'_, '_> {
    fn push_label(&mut self, label: &[u8]) -> VisitResult {
        let top = self.stack.last_mut().ok_or(VisitError::IllegalSequence)?;
        if top.kind != FrameKind::Object {
            return Err(VisitError::IllegalSequence);
        }
        if top.has_member {
            self.dest.append_byte(b',')?;
        }
        self.indent_value()?;
        self.quoted(label)?;
        self.dest.append_byte(b':')?;
        Ok(())
    }

    fn start_object(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.stack.push(Frame {
            kind: FrameKind::Object,
            has_member: false,
        });
        self.dest.append_byte(b'{')?;
        Ok(())
    }

    fn end_object(&mut self) -> VisitResult {
        self.outdent()?;
        self.dest.append_byte(b'}')?;
        self.pop(FrameKind::Object)
    }

    fn start_array(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.stack.push(Frame {
            kind: FrameKind::Array,
            has_member: false,
        });
        self.dest.append_byte(b'[')?;
        Ok(())
    }

    fn end_array(&mut self) -> VisitResult {
        self.outdent()?;
        self.dest.append_byte(b']')?;
        self.pop(FrameKind::Array)
    }

    fn add_empty_object(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(b"{}")?;
        Ok(())
    }

    fn add_empty_array(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(b"[]")?;
        Ok(())
    }

    fn add_bool(&mut self, value: bool) -> VisitResult {
        self.introduce_value()?;
        self.dest
            .append(if value { b"true".as_slice() } else { b"false" })?;
        Ok(())
    }

    fn add_number(&mut self, lexeme: &[u8]) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(lexeme)?;
        Ok(())
    }

    fn add_string(&mut self, value: &[u8]) -> VisitResult {
        self.introduce_value()?;
        self.quoted(value)
    }

    fn add_null(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(b"null")?;
        Ok(())
    }

    fn add_undefined(&mut self) -> VisitResult {
        self.introduce_value()?;
        self.dest.append(b"undefined")?;
        Ok(())
    }
}
