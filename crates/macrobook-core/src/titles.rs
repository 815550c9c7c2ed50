//! Group names from the `mcr*.ttl` title files.
//!
//! Each title file holds a 24-byte header followed by up to 40 null-padded
//! 16-byte ASCII names. Names from all title files form one list indexed by
//! group number.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::book::glob_in;
use crate::config::TITLE_FILE_PATTERN;
use crate::config::layout::{TITLE_FILE_PREFIX_SIZE, TITLE_RECORD_SIZE, TITLE_RECORDS_PER_FILE};
use crate::decode::decode_ascii_until_nul;
use crate::error::Result;

/// Read the group names stored in one title file.
///
/// A read error partway through keeps the names read so far; only a file
/// that cannot be positioned past its header is an error.
pub fn parse_title_file<R: Read + Seek>(mut reader: R) -> Result<Vec<String>> {
    reader.seek(SeekFrom::Start(TITLE_FILE_PREFIX_SIZE))?;

    let mut names = Vec::with_capacity(TITLE_RECORDS_PER_FILE);
    let mut record = Vec::with_capacity(TITLE_RECORD_SIZE);
    for _ in 0..TITLE_RECORDS_PER_FILE {
        record.clear();
        if let Err(e) = (&mut reader)
            .take(TITLE_RECORD_SIZE as u64)
            .read_to_end(&mut record)
        {
            warn!("Title file read failed after {} names: {}", names.len(), e);
            break;
        }
        if record.is_empty() {
            break;
        }
        names.push(decode_ascii_until_nul(&record));
    }

    Ok(names)
}

/// Load group names from every title file in `dir`, in natural file order.
///
/// Title files that cannot be read are logged and skipped.
pub fn load_titles_from_directory<P: AsRef<Path>>(dir: P) -> Vec<String> {
    let dir = dir.as_ref();
    let files = match find_title_files(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!("Failed to list title files in {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for path in files {
        let result = File::open(&path)
            .map_err(Into::into)
            .and_then(|f| parse_title_file(BufReader::new(f)));
        match result {
            Ok(file_names) => {
                debug!("Loaded {} titles from {:?}", file_names.len(), path);
                names.extend(file_names);
            }
            Err(e) => warn!("Failed to load title file {:?}: {}", path, e),
        }
    }
    names
}

/// Title files in `dir` (`mcr*.ttl`), sorted by `natural_sort_key`.
pub fn find_title_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(Vec<SortPart>, PathBuf)> = glob_in(dir, TITLE_FILE_PATTERN)?
        .flatten()
        .filter_map(|path| {
            let key = natural_sort_key(path.file_name()?.to_str()?);
            Some((key, path))
        })
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// One run of a natural sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortPart {
    Number(u64),
    Text(String),
}

impl Ord for SortPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key that orders `mcr.ttl` before `mcr_2.ttl` and `mcr_2.ttl` before
/// `mcr_10.ttl`.
///
/// `mcr.ttl` is treated as `mcr_1.ttl`; digit runs compare numerically and
/// text runs compare case-insensitively.
pub fn natural_sort_key(name: &str) -> Vec<SortPart> {
    let name = name.replace("mcr.ttl", "mcr_1.ttl");

    let mut parts = Vec::new();
    let mut text = String::new();
    let mut digits = String::new();

    for c in name.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                parts.push(SortPart::Text(std::mem::take(&mut text)));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                parts.push(number_part(&std::mem::take(&mut digits)));
            }
            text.extend(c.to_lowercase());
        }
    }
    if !digits.is_empty() {
        parts.push(number_part(&digits));
    }
    if !text.is_empty() {
        parts.push(SortPart::Text(text));
    }

    parts
}

fn number_part(digits: &str) -> SortPart {
    digits
        .parse()
        .map(SortPart::Number)
        .unwrap_or_else(|_| SortPart::Text(digits.to_string()))
}
