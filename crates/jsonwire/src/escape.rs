//! UTF-8 classification and escaping for JSON string output, plus the
//! modified-UTF-8 packing used for NUL-terminated object labels.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::OutOfMemory;

/// How non-ASCII content is rendered in JSON text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Escape everything above `0x7E`; decoded codepoints emit `\uxxxx`
    /// (codepoints above `U+FFFF` degrade to the replacement escape).
    #[default]
    Ascii,
    /// Pass well-formed UTF-8 sequences through verbatim.
    Utf8,
}

// Byte classes. Entries at or above 0x20 are the literal escape letter.
const LITERAL: u8 = 0;
const SELF_ESCAPE: u8 = 1;
const DOUBLE_QUOTE: u8 = 2;
const SINGLE_QUOTE: u8 = 3;
const INVALID: u8 = 4;
const NUMERIC_ESCAPE: u8 = 5;
const UTF8_LEAD_2: u8 = 6;
const UTF8_LEAD_3: u8 = 7;
const UTF8_LEAD_4: u8 = 8;

const REPLACEMENT: &[u8] = b"\\uFFFD";

static ESCAPE_TABLE: [u8; 256] = build_escape_table();

const fn build_escape_table() -> [u8; 256] {
    let mut table = [LITERAL; 256];

    // Control bytes escape numerically unless they have a short form.
    let mut i = 0x01;
    while i < 0x20 {
        table[i] = NUMERIC_ESCAPE;
        i += 1;
    }
    table[0x00] = b'0';
    table[0x08] = b'b';
    table[0x09] = b't';
    table[0x0a] = b'n';
    table[0x0b] = b'v';
    table[0x0c] = b'f';
    table[0x0d] = b'r';
    table[0x7f] = NUMERIC_ESCAPE;

    table[b'"' as usize] = DOUBLE_QUOTE;
    table[b'\'' as usize] = SINGLE_QUOTE;
    table[b'\\' as usize] = SELF_ESCAPE;

    let mut i = 0x80;
    while i < 0xc0 {
        table[i] = INVALID;
        i += 1;
    }
    while i < 0xe0 {
        table[i] = UTF8_LEAD_2;
        i += 1;
    }
    while i < 0xf0 {
        table[i] = UTF8_LEAD_3;
        i += 1;
    }
    while i < 0xf8 {
        table[i] = UTF8_LEAD_4;
        i += 1;
    }
    while i < 0x100 {
        table[i] = INVALID;
        i += 1;
    }

    table
}

const HEX: &[u8; 16] = b"0123456789abcdef";

fn unicode_escape(codepoint: u32) -> [u8; 6] {
    [
        b'\\',
        b'u',
        HEX[(codepoint >> 12 & 0xf) as usize],
        HEX[(codepoint >> 8 & 0xf) as usize],
        HEX[(codepoint >> 4 & 0xf) as usize],
        HEX[(codepoint & 0xf) as usize],
    ]
}

fn numeric_escape(byte: u8) -> [u8; 4] {
    [
        b'\\',
        b'x',
        HEX[(byte >> 4) as usize],
        HEX[(byte & 0xf) as usize],
    ]
}

/// Decodes the multi-byte sequence of length `want` starting at `index`.
/// Returns the codepoint, or `None` for truncated or malformed sequences.
fn decode_sequence(source: &[u8], index: usize, want: usize) -> Option<u32> {
    let seq = source.get(index..index + want)?;
    let lead_bits = match want {
        2 => seq[0] & 0x1f,
        3 => seq[0] & 0x0f,
        _ => seq[0] & 0x07,
    };
    let mut codepoint = u32::from(lead_bits);
    for &byte in &seq[1..] {
        if byte >> 6 != 0b10 {
            return None;
        }
        codepoint = (codepoint << 6) | u32::from(byte & 0x3f);
    }
    Some(codepoint)
}

/// Escapes `source` into `dest` as the body of a JSON string literal.
///
/// The surrounding quote characters are never written. Spans of literal
/// bytes are accumulated and appended in one call rather than byte by byte.
pub(crate) fn escape_json(
    dest: &mut Buffer,
    source: &[u8],
    mode: EscapeMode,
    escape_single_quote: bool,
    escape_double_quote: bool,
) -> Result<(), OutOfMemory> {
    let len = source.len();
    let mut mark = 0;
    let mut index = 0;

    while index < len {
        let cur = source[index];
        let class = ESCAPE_TABLE[usize::from(cur)];

        let literal = class == LITERAL
            || (class == DOUBLE_QUOTE && !escape_double_quote)
            || (class == SINGLE_QUOTE && !escape_single_quote);
        if literal {
            index += 1;
            continue;
        }

        if matches!(class, UTF8_LEAD_2 | UTF8_LEAD_3 | UTF8_LEAD_4) {
            let want = usize::from(class - UTF8_LEAD_2) + 2;
            let decoded = decode_sequence(source, index, want);
            if decoded.is_some() && mode == EscapeMode::Utf8 {
                index += want;
                continue;
            }
            dest.append(&source[mark..index])?;
            match decoded {
                Some(codepoint) if codepoint <= 0xffff => {
                    dest.append(&unicode_escape(codepoint))?;
                }
                // Above the \uXXXX range, or malformed.
                _ => dest.append(REPLACEMENT)?,
            }
            index += if decoded.is_some() {
                want
            } else {
                want.min(len - index)
            };
            mark = index;
            continue;
        }

        dest.append(&source[mark..index])?;
        match class {
            SELF_ESCAPE => dest.append(&[b'\\', cur])?,
            DOUBLE_QUOTE => dest.append(b"\\\"")?,
            SINGLE_QUOTE => dest.append(b"\\'")?,
            INVALID => dest.append(REPLACEMENT)?,
            NUMERIC_ESCAPE => dest.append(&numeric_escape(cur))?,
            letter => dest.append(&[b'\\', letter])?,
        }
        index += 1;
        mark = index;
    }

    dest.append(&source[mark..])
}

/// Appends `source` as modified UTF-8: every `0x00` becomes `0xC0 0x80`,
/// followed by a single terminating `0x00`.
pub(crate) fn append_modified_utf8z(dest: &mut Buffer, source: &[u8]) -> Result<(), OutOfMemory> {
    let mut mark = 0;
    for (i, &byte) in source.iter().enumerate() {
        if byte == 0 {
            dest.append(&source[mark..i])?;
            dest.append(&[0xc0, 0x80])?;
            mark = i + 1;
        }
    }
    dest.append(&source[mark..])?;
    dest.append_byte(0)
}

/// Decodes a NUL-terminated modified-UTF-8 label from the front of
/// `source` into `label`, collapsing `0xC0 0x80` back to `0x00`.
///
/// Returns the number of source bytes consumed including the terminator,
/// or `None` when no terminator is present.
pub(crate) fn unpack_modified_utf8z(source: &[u8], label: &mut Vec<u8>) -> Option<usize> {
    label.clear();
    let mut i = 0;
    while i < source.len() {
        let byte = source[i];
        if byte == 0 {
            return Some(i + 1);
        }
        if byte == 0xc0 && source.get(i + 1) == Some(&0x80) {
            label.push(0);
            i += 2;
        } else {
            label.push(byte);
            i += 1;
        }
    }
    None
}
