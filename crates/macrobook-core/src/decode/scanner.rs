//! Block framing for macro data files.
//!
//! A data file is a fixed header followed by `BLOCK_SIZE` blocks. Scanning
//! stops at the first read shorter than `MIN_BLOCK_SIZE`, which is how the
//! end of data is detected; a trailing fragment is not an error.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, warn};

use super::block::{MacroRecord, parse_block};
use crate::config::layout::{BLOCK_SIZE, MIN_BLOCK_SIZE, PREFIX_SIZE};
use crate::error::Result;
use crate::lookup::LookupTables;

/// Iterator over the macro records of one data file.
///
/// Yields records in file order. After a short read, end of file or an I/O
/// error the scanner is done and keeps returning `None`.
pub struct MacroScanner<'a, R: Read> {
    reader: R,
    tables: &'a LookupTables,
    buffer: Box<[u8; BLOCK_SIZE]>,
    done: bool,
}

impl<'a, R: Read + Seek> MacroScanner<'a, R> {
    /// Create a scanner positioned after the file header.
    pub fn new(mut reader: R, tables: &'a LookupTables) -> Result<Self> {
        reader.seek(SeekFrom::Start(PREFIX_SIZE))?;
        Ok(Self::after_header(reader, tables))
    }
}

impl<'a, R: Read> MacroScanner<'a, R> {
    /// Create a scanner for a reader already positioned at the first block.
    pub fn after_header(reader: R, tables: &'a LookupTables) -> Self {
        Self {
            reader,
            tables,
            buffer: Box::new([0u8; BLOCK_SIZE]),
            done: false,
        }
    }
}

impl<R: Read> Iterator for MacroScanner<'_, R> {
    type Item = Result<MacroRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let read = match read_up_to(&mut self.reader, &mut self.buffer[..]) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };

        if read < MIN_BLOCK_SIZE {
            if read > 0 {
                debug!("Ignoring {} trailing bytes", read);
            }
            self.done = true;
            return None;
        }

        Some(parse_block(&self.buffer[..read], self.tables))
    }
}

/// Fills `buf` as far as the reader allows, returning the byte count.
///
/// Unlike `read_exact`, reaching end of file early is not an error.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decode every macro record in a data file.
///
/// Failures are logged and end the scan: a file that cannot be opened yields
/// no records, a read error keeps the records decoded before it.
pub fn scan_file<P: AsRef<Path>>(path: P, tables: &LookupTables) -> Vec<MacroRecord> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to open {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let scanner = match MacroScanner::new(BufReader::new(file), tables) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for record in scanner {
        match record {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                break;
            }
        }
    }

    let blank = records.iter().filter(|r| r.is_blank()).count();
    debug!(
        "Decoded {} macros ({} blank) from {:?}",
        records.len(),
        blank,
        path
    );
    records
}
