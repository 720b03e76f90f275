#![no_main]

use jsonwire::{
    Buffer, EscapeMode, TextOptions, transcode_binary_to_json, transcode_json_to_binary,
    transcode_json_to_json, validate_json,
};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes exercise the whole pipeline: validation must agree with
// encoding, and whatever the binary writer accepts must decode again.
fuzz_target!(|data: &[u8]| {
    let valid = validate_json(data);

    let mut binary = Buffer::new();
    assert_eq!(transcode_json_to_binary(data, &mut binary), valid);

    if !valid {
        // The failure surface is a NUL-terminated message.
        assert_eq!(binary.as_slice().last(), Some(&0u8));
        return;
    }

    // Whatever the binary writer produced must decode again, in both
    // output modes.
    for escape in [EscapeMode::Ascii, EscapeMode::Utf8] {
        let options = TextOptions {
            indent: None,
            escape,
        };
        let mut text = Buffer::new();
        assert!(transcode_binary_to_json(
            binary.as_slice(),
            &mut text,
            &options
        ));
    }

    // Compact json-to-json output encodes to the same binary bytes. The
    // output is a JSON superset (`\xHH` escapes for bare control bytes)
    // that the lexer does not read back, so only re-encode what validates.
    let mut normalized = Buffer::new();
    assert!(transcode_json_to_json(
        data,
        &mut normalized,
        &TextOptions {
            indent: None,
            escape: EscapeMode::Utf8,
        }
    ));
    if validate_json(normalized.as_slice()) {
        let mut binary_again = Buffer::new();
        assert!(transcode_json_to_binary(
            normalized.as_slice(),
            &mut binary_again
        ));
        assert_eq!(binary_again.as_slice(), binary.as_slice());
    }
});
