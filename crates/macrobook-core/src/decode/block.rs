use super::line::decode_line_lossy;
use super::text::decode_legacy_until_nul;
use crate::config::layout::{LINE_COUNT, LINE_SIZE, MIN_BLOCK_SIZE, TITLE_OFFSET, TRAILER_SIZE};
use crate::error::{Error, Result};
use crate::lookup::LookupTables;

/// One decoded macro: six lines and a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroRecord {
    pub title: String,
    pub lines: [String; LINE_COUNT],
    /// Bytes after the title, kept uninterpreted.
    pub trailer: Vec<u8>,
}

impl MacroRecord {
    /// True if neither the title nor any line carries text.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.lines.iter().all(|line| line.is_empty())
    }
}

/// Parses one block into a macro record.
///
/// Lines that fail to decode are rendered as an inline error marker so the
/// rest of the block is still usable.
pub fn parse_block(block: &[u8], tables: &LookupTables) -> Result<MacroRecord> {
    if block.len() < MIN_BLOCK_SIZE {
        return Err(Error::ShortBlock {
            expected: MIN_BLOCK_SIZE,
            actual: block.len(),
        });
    }

    let lines = std::array::from_fn(|i| {
        let start = i * LINE_SIZE;
        decode_line_lossy(&block[start..start + LINE_SIZE], tables)
    });
    let title = decode_legacy_until_nul(&block[TITLE_OFFSET..MIN_BLOCK_SIZE]);
    let trailer = block[MIN_BLOCK_SIZE..]
        .iter()
        .take(TRAILER_SIZE)
        .copied()
        .collect();

    Ok(MacroRecord {
        title,
        lines,
        trailer,
    })
}
