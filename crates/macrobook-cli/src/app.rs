//! One conversion run: load support tables, decode the directory, write the
//! document.

use anyhow::{Context, Result};
use chrono::Utc;
use macrobook_core::{
    BookConfig, LookupTables, MacroBook, build_book, format_timestamp,
    load_titles_from_directory, write_book_to_file,
};
use tracing::{info, warn};

/// Runs a conversion.
///
/// Missing lookup tables, title files or macro directory are logged and
/// produce a sparser document; only failing to write the output is an error.
pub fn run(config: &BookConfig) -> Result<()> {
    info!("Reading macros from {:?}", config.directory);

    let tables = LookupTables::load_or_empty(&config.auto_trans_path, &config.items_path);
    let names = load_titles_from_directory(&config.directory);
    info!("Loaded {} group names", names.len());

    let book = match build_book(&config.directory, &tables, &names) {
        Ok(book) => book,
        Err(e) => {
            warn!("Failed to scan {:?}: {}", config.directory, e);
            MacroBook::default()
        }
    };

    let timestamp = format_timestamp(Utc::now());
    write_book_to_file(&config.output_path, &book, &timestamp, config.format)
        .with_context(|| format!("Failed to write {:?}", config.output_path))?;

    info!(
        "Wrote {} macros to {:?} ({})",
        book.macro_count(),
        config.output_path,
        config.format
    );
    Ok(())
}
