//! Wire-format constants and the type-and-length header codec.
//!
//! Every binary value is `<TYPE_AND_LENGTH><DATA>`. The first byte packs a
//! 3-bit type code, a continuation flag, and the low four bits of the
//! payload length; when the flag is set, up to four further bytes carry
//! seven length bits each (shifts 4, 11, 18, 25), high bit meaning more.
//! Lengths are unsigned and limited to 32 bits.

use crate::buffer::Buffer;
use crate::error::{BinaryError, OutOfMemory};

pub(crate) const TYPE_OBJECT: u8 = 0x00;
pub(crate) const TYPE_ARRAY: u8 = 0x01;
pub(crate) const TYPE_STRING: u8 = 0x02;
pub(crate) const TYPE_NUMBER: u8 = 0x03;
pub(crate) const TYPE_SIMPLE: u8 = 0x04;

pub(crate) const TYPE_SHIFT: u32 = 5;
pub(crate) const LENGTH_CONT: u8 = 0x10;

// A simple scalar is the fixed byte pair `0x81 <data>`; the first byte is
// just the TYPE_SIMPLE header with payload length one.
pub(crate) const SS_PREFIX: u8 = (TYPE_SIMPLE << TYPE_SHIFT) | 0x01;
pub(crate) const SS_FALSE: u8 = 0x00;
pub(crate) const SS_TRUE: u8 = 0x01;
pub(crate) const SS_NULL: u8 = 0x02;
pub(crate) const SS_UNDEFINED: u8 = 0x03;

/// Length bytes reserved when a compound starts, before its payload size
/// is known. Correct for any value in `0..=5`; one byte trades the best
/// average write cost against a possible move for large compounds.
pub(crate) const RESERVE_LENGTH: usize = 1;

/// A decoded type-and-length header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeLength {
    pub ty: u8,
    pub length: u32,
    /// Bytes occupied by the header itself.
    pub header_len: usize,
}

/// Encodes the continuation bytes for the length bits above the header
/// nibble. `rest` must be non-zero; at most four bytes are produced.
pub(crate) fn length_tail(mut rest: u32) -> ([u8; 4], usize) {
    let mut bytes = [0u8; 4];
    let mut n = 0;
    loop {
        let chunk = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest == 0 {
            bytes[n] = chunk;
            n += 1;
            return (bytes, n);
        }
        bytes[n] = chunk | 0x80;
        n += 1;
    }
}

/// Appends a type-and-length header for a payload of known size.
pub(crate) fn write_type_length(
    dest: &mut Buffer,
    ty: u8,
    length: u32,
) -> Result<(), OutOfMemory> {
    let nibble = (length & 0x0f) as u8;
    let rest = length >> 4;
    if rest == 0 {
        return dest.append_byte((ty << TYPE_SHIFT) | nibble);
    }
    dest.append_byte((ty << TYPE_SHIFT) | nibble | LENGTH_CONT)?;
    let (bytes, n) = length_tail(rest);
    dest.append(&bytes[..n])
}

/// Decodes the type-and-length header at the front of `source`.
///
/// Continuation chunks accumulate by OR into the running length. A fifth
/// continuation byte cannot fit in 32 bits and is rejected.
pub(crate) fn decode_type_length(source: &[u8]) -> Result<TypeLength, BinaryError> {
    let Some(&spec) = source.first() else {
        return Err(BinaryError::Truncated);
    };
    let ty = spec >> TYPE_SHIFT;
    let mut length = u32::from(spec & 0x0f);
    let mut header_len = 1;

    if spec & LENGTH_CONT != 0 {
        let mut shift = 4;
        loop {
            let Some(&byte) = source.get(header_len) else {
                return Err(BinaryError::Truncated);
            };
            header_len += 1;
            length |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift > 25 {
                return Err(BinaryError::LengthOverflow);
            }
        }
    }

    Ok(TypeLength {
        ty,
        length,
        header_len,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn encoded(ty: u8, length: u32) -> alloc::vec::Vec<u8> {
        let mut buf = Buffer::new();
        write_type_length(&mut buf, ty, length).unwrap();
        buf.as_slice().to_vec()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(15)]
    #[case(16)]
    #[case(2047)]
    #[case(2048)]
    #[case(262_143)]
    #[case(262_144)]
    #[case(4_294_967_295)]
    fn header_round_trips(#[case] length: u32) {
        let bytes = encoded(TYPE_STRING, length);
        let decoded = decode_type_length(&bytes).unwrap();
        assert_eq!(decoded.ty, TYPE_STRING);
        assert_eq!(decoded.length, length);
        assert_eq!(decoded.header_len, bytes.len());
    }

    #[rstest]
    #[case(0, &[0x40])]
    #[case(15, &[0x4f])]
    #[case(16, &[0x50, 0x01])]
    #[case(2047, &[0x5f, 0x7f])]
    #[case(2048, &[0x50, 0x80, 0x01])]
    #[case(262_143, &[0x5f, 0xff, 0x7f])]
    #[case(262_144, &[0x50, 0x80, 0x80, 0x01])]
    #[case(4_294_967_295, &[0x5f, 0xff, 0xff, 0xff, 0x7f])]
    fn header_bytes_are_exact(#[case] length: u32, #[case] expected: &[u8]) {
        assert_eq!(encoded(TYPE_STRING, length), expected);
    }

    #[test]
    fn simple_scalar_prefix_is_the_header_byte() {
        assert_eq!(SS_PREFIX, 0x81);
        assert_eq!(encoded(TYPE_SIMPLE, 1), &[SS_PREFIX]);
    }

    #[test]
    fn truncated_headers_are_rejected() {
        assert_eq!(decode_type_length(&[]), Err(BinaryError::Truncated));
        assert_eq!(decode_type_length(&[0x50]), Err(BinaryError::Truncated));
        assert_eq!(
            decode_type_length(&[0x50, 0x80, 0x80]),
            Err(BinaryError::Truncated)
        );
    }

    #[test]
    fn five_continuation_bytes_overflow() {
        assert_eq!(
            decode_type_length(&[0x50, 0x80, 0x80, 0x80, 0x80, 0x01]),
            Err(BinaryError::LengthOverflow)
        );
    }

    #[test]
    fn type_codes_unpack() {
        let decoded = decode_type_length(&[(TYPE_NUMBER << TYPE_SHIFT) | 0x03]).unwrap();
        assert_eq!(decoded.ty, TYPE_NUMBER);
        assert_eq!(decoded.length, 3);
    }
}
