use thiserror::Error;
use tracing::trace;

use super::text::decode_legacy;
use super::token::EscapeToken;
use crate::config::layout::{ESCAPE_MARKER, ESCAPE_TOKEN_SIZE, LINE_SIZE};
use crate::lookup::LookupTables;

/// What went wrong while decoding a line.
///
/// Token windows and literal runs always decode (malformed text becomes
/// U+FFFD), so the only failure is a caller handing over more bytes than a
/// line slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineDecodeErrorKind {
    #[error("line is {len} bytes, longer than {max}")]
    LineTooLong { len: usize, max: usize },
}

/// Why a line could not be decoded, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} (byte {offset})")]
pub struct LineDecodeError {
    pub kind: LineDecodeErrorKind,
    pub offset: usize,
}

/// The escape token starting at `pos`, if a complete one is there.
pub fn escape_token_at(line: &[u8], pos: usize) -> Option<EscapeToken> {
    let window: &[u8; ESCAPE_TOKEN_SIZE] =
        line.get(pos..pos + ESCAPE_TOKEN_SIZE)?.try_into().ok()?;
    (window[0] == ESCAPE_MARKER && window[ESCAPE_TOKEN_SIZE - 1] == ESCAPE_MARKER)
        .then(|| EscapeToken::from_window(window))
}

/// Decodes one macro line.
///
/// Literal runs are decoded as Shift-JIS, escape tokens are replaced by their
/// bracketed lookup text, and trailing null padding is stripped.
///
/// `line` must fit in one line slot of a block; anything longer is rejected
/// with [`LineDecodeErrorKind::LineTooLong`] rather than decoded.
pub fn decode_line(line: &[u8], tables: &LookupTables) -> Result<String, LineDecodeError> {
    if line.len() > LINE_SIZE {
        return Err(LineDecodeError {
            kind: LineDecodeErrorKind::LineTooLong {
                len: line.len(),
                max: LINE_SIZE,
            },
            offset: LINE_SIZE,
        });
    }

    let mut decoded = String::with_capacity(line.len());
    let mut pos = 0;

    while pos < line.len() {
        if let Some(token) = escape_token_at(line, pos) {
            trace!(
                "Token at {}: kind={:#x} ({}) id={}",
                pos,
                token.kind,
                token.table_kind().map_or("unknown", |k| k.name()),
                token.id
            );
            decoded.push_str(&token.resolve(tables));
            pos += ESCAPE_TOKEN_SIZE;
        } else {
            let start = pos;
            pos += 1;
            while pos < line.len() && escape_token_at(line, pos).is_none() {
                pos += 1;
            }
            decoded.push_str(&decode_legacy(&line[start..pos]));
        }
    }

    let len = decoded.trim_end_matches('\0').len();
    decoded.truncate(len);
    Ok(decoded)
}

/// Decodes one macro line, rendering a failure as an inline marker.
pub fn decode_line_lossy(line: &[u8], tables: &LookupTables) -> String {
    decode_line(line, tables).unwrap_or_else(|e| format!("[decode error: {e}]"))
}
