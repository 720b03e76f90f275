//! Recursive consumer of the binary form, driving a [`Visitor`].

use alloc::vec::Vec;

use crate::error::{BinaryError, Error};
use crate::escape::unpack_modified_utf8z;
use crate::visitor::Visitor;
use crate::wire::{
    SS_FALSE, SS_NULL, SS_TRUE, SS_UNDEFINED, TYPE_ARRAY, TYPE_NUMBER, TYPE_OBJECT, TYPE_SIMPLE,
    TYPE_STRING, decode_type_length,
};

/// Reads one complete binary value from `source`, driving `visitor`.
///
/// No intermediate structures are built; events fire as the payload is
/// walked.
///
/// # Errors
///
/// Fails on truncation, unknown type codes, malformed simple scalars, or a
/// length continuation that overflows 32 bits, and forwards any visitor
/// error.
pub fn read_binary<V: Visitor>(source: &[u8], visitor: &mut V) -> Result<(), Error> {
    let ((ty, payload), _trailing) = split_value(source)?;
    read_value(ty, payload, visitor)
}

/// Decodes the header at the front of `source` and splits off the value's
/// payload, returning the remainder as well.
fn split_value(source: &[u8]) -> Result<((u8, &[u8]), &[u8]), BinaryError> {
    let header = decode_type_length(source)?;
    let end = header
        .header_len
        .checked_add(header.length as usize)
        .ok_or(BinaryError::Truncated)?;
    let payload = source
        .get(header.header_len..end)
        .ok_or(BinaryError::Truncated)?;
    Ok(((header.ty, payload), &source[end..]))
}

fn read_value<V: Visitor>(ty: u8, payload: &[u8], visitor: &mut V) -> Result<(), Error> {
    match ty {
        TYPE_OBJECT => read_object(payload, visitor),
        TYPE_ARRAY => read_array(payload, visitor),
        TYPE_STRING => {
            visitor.add_string(payload)?;
            Ok(())
        }
        // The payload is a valid numeric lexeme; echo it untouched.
        TYPE_NUMBER => {
            visitor.add_number(payload)?;
            Ok(())
        }
        TYPE_SIMPLE => {
            let &[data] = payload else {
                return Err(BinaryError::MalformedScalar.into());
            };
            match data {
                SS_FALSE => visitor.add_bool(false)?,
                SS_TRUE => visitor.add_bool(true)?,
                SS_NULL => visitor.add_null()?,
                SS_UNDEFINED => visitor.add_undefined()?,
                _ => return Err(BinaryError::MalformedScalar.into()),
            }
            Ok(())
        }
        other => Err(BinaryError::UnknownType(other).into()),
    }
}

/// Walks an object payload: modified-UTF-8 labels alternating with values.
fn read_object<V: Visitor>(mut payload: &[u8], visitor: &mut V) -> Result<(), Error> {
    if payload.is_empty() {
        visitor.add_empty_object()?;
        return Ok(());
    }
    visitor.start_object()?;
    let mut label = Vec::new();
    while !payload.is_empty() {
        let consumed =
            unpack_modified_utf8z(payload, &mut label).ok_or(BinaryError::Truncated)?;
        visitor.push_label(&label)?;
        payload = &payload[consumed..];

        let ((ty, value), rest) = split_value(payload)?;
        read_value(ty, value, visitor)?;
        payload = rest;
    }
    visitor.end_object()?;
    Ok(())
}

fn read_array<V: Visitor>(mut payload: &[u8], visitor: &mut V) -> Result<(), Error> {
    if payload.is_empty() {
        visitor.add_empty_array()?;
        return Ok(());
    }
    visitor.start_array()?;
    while !payload.is_empty() {
        let ((ty, value), rest) = split_value(payload)?;
        read_value(ty, value, visitor)?;
        payload = rest;
    }
    visitor.end_array()?;
    Ok(())
}
