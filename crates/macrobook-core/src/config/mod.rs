//! Layout constants and run configuration.
//!
//! - `layout` - byte layout of the `mcr*.dat` and `mcr*.ttl` files
//! - `output` - grouping and pagination of the generated document
//! - `BookConfig` - paths and format for one conversion run

use std::path::PathBuf;

use crate::export::OutputFormat;

/// Byte layout of the macro data and title files.
///
/// A data file is a 28-byte header followed by 380-byte blocks:
/// 6 lines × 61 bytes, an 8-byte title and 6 trailing bytes.
pub mod layout {
    /// Header bytes skipped at the start of every data file.
    pub const PREFIX_SIZE: u64 = 28;

    /// Width of one encoded macro line.
    pub const LINE_SIZE: usize = 61;

    /// Lines per macro record.
    pub const LINE_COUNT: usize = 6;

    /// Width of the macro title field.
    pub const TITLE_SIZE: usize = 8;

    /// Trailing bytes after the title (not interpreted).
    pub const TRAILER_SIZE: usize = 6;

    /// Offset of the title field inside a block.
    pub const TITLE_OFFSET: usize = LINE_SIZE * LINE_COUNT;

    /// Smallest read that still carries a complete record.
    pub const MIN_BLOCK_SIZE: usize = TITLE_OFFSET + TITLE_SIZE;

    /// Full block size including the trailer.
    pub const BLOCK_SIZE: usize = MIN_BLOCK_SIZE + TRAILER_SIZE;

    /// First and last byte of an inline escape token.
    pub const ESCAPE_MARKER: u8 = 0xFD;

    /// Length of an inline escape token, markers included.
    pub const ESCAPE_TOKEN_SIZE: usize = 6;

    /// Header bytes skipped at the start of every title file.
    pub const TITLE_FILE_PREFIX_SIZE: u64 = 24;

    /// Width of one group name record in a title file.
    pub const TITLE_RECORD_SIZE: usize = 16;

    /// Group name records stored per title file.
    pub const TITLE_RECORDS_PER_FILE: usize = 40;
}

/// Document layout.
pub mod output {
    /// Macros shown on one palette.
    pub const PALETTE_SIZE: usize = 20;

    /// Consecutive data files that make up one group.
    pub const FILES_PER_GROUP: u32 = 10;

    /// Offset of the timestamp written in the document header (JST).
    pub const TIMESTAMP_UTC_OFFSET_SECS: i32 = 9 * 3600;

    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// File name patterns searched in the macro directory.
pub const DATA_FILE_PATTERN: &str = "mcr*.dat";
pub const TITLE_FILE_PATTERN: &str = "mcr*.ttl";

pub const DEFAULT_AUTO_TRANS_PATH: &str = "resources_yaml/data/auto_translates.yaml";
pub const DEFAULT_ITEMS_PATH: &str = "resources_yaml/data/items.yaml";
pub const DEFAULT_OUTPUT_PATH: &str = "mc.yaml";

/// Inputs and outputs of one conversion run.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Directory holding `mcr*.dat` and `mcr*.ttl`.
    pub directory: PathBuf,
    pub auto_trans_path: PathBuf,
    pub items_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            auto_trans_path: PathBuf::from(DEFAULT_AUTO_TRANS_PATH),
            items_path: PathBuf::from(DEFAULT_ITEMS_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: OutputFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_layout() {
        assert_eq!(layout::TITLE_OFFSET, 366);
        assert_eq!(layout::MIN_BLOCK_SIZE, 374);
        assert_eq!(layout::BLOCK_SIZE, 380);
    }

    #[test]
    fn test_default_config() {
        let config = BookConfig::default();
        assert_eq!(config.output_path, PathBuf::from("mc.yaml"));
        assert_eq!(config.format, OutputFormat::Yaml);
    }
}
