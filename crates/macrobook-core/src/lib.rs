pub mod book;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod lookup;
pub mod titles;

pub use book::{Group, MacroBook, MacroEntry, Palette, build_book, discover_data_files};
pub use config::BookConfig;
pub use decode::{
    EscapeToken, LineDecodeError, MacroRecord, MacroScanner, TableKind, decode_line,
    decode_line_lossy, parse_block, scan_file,
};
pub use error::{Error, Result};
pub use export::{OutputFormat, format_timestamp, write_book, write_book_to_file};
pub use lookup::{LookupTable, LookupTables};
pub use titles::{load_titles_from_directory, parse_title_file};
