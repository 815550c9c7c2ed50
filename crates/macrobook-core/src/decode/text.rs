//! Legacy text decoding.
//!
//! Macro text is stored as Shift-JIS (CP932). `encoding_rs::SHIFT_JIS`
//! covers the CP932 extensions and substitutes U+FFFD for malformed input.
//! The single bytes 0xA0 and 0xFD-0xFF, which have no WHATWG mapping, are
//! decoded to the private-use characters U+F8F0-U+F8F3 as Windows does.

use encoding_rs::SHIFT_JIS;
use tracing::trace;

/// Decodes Shift-JIS bytes, keeping null bytes as U+0000.
pub fn decode_legacy(bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    let mut start = 0;
    let mut pos = 0;

    while let Some(&byte) = bytes.get(pos) {
        if is_lead_byte(byte) && bytes.get(pos + 1).is_some_and(|&b| is_trail_byte(b)) {
            pos += 2;
            continue;
        }
        if let Some(c) = single_byte_extension(byte) {
            decode_segment(&bytes[start..pos], &mut decoded);
            decoded.push(c);
            start = pos + 1;
        }
        pos += 1;
    }
    decode_segment(&bytes[start..], &mut decoded);

    decoded
}

fn decode_segment(bytes: &[u8], out: &mut String) {
    if bytes.is_empty() {
        return;
    }
    let (decoded, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
    if had_errors {
        trace!(
            "Shift-JIS decoding had errors for bytes: {:?}",
            &bytes[..bytes.len().min(20)]
        );
    }
    out.push_str(&decoded);
}

fn is_lead_byte(byte: u8) -> bool {
    matches!(byte, 0x81..=0x9F | 0xE0..=0xFC)
}

fn is_trail_byte(byte: u8) -> bool {
    matches!(byte, 0x40..=0x7E | 0x80..=0xFC)
}

/// CP932 single bytes outside the WHATWG Shift_JIS table.
fn single_byte_extension(byte: u8) -> Option<char> {
    match byte {
        0xA0 => Some('\u{F8F0}'),
        0xFD => Some('\u{F8F1}'),
        0xFE => Some('\u{F8F2}'),
        0xFF => Some('\u{F8F3}'),
        _ => None,
    }
}

/// Decodes Shift-JIS bytes up to the first null terminator.
pub fn decode_legacy_until_nul(bytes: &[u8]) -> String {
    decode_legacy(until_nul(bytes))
}

/// Keeps only the ASCII bytes before the first null terminator.
pub fn decode_ascii_until_nul(bytes: &[u8]) -> String {
    until_nul(bytes)
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect()
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..len]
}
