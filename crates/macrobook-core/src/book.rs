//! Grouping of decoded macros into books and palettes.
//!
//! Data files are numbered `mcr.dat` (0), `mcr1.dat`, `mcr2.dat`, ... and
//! every ten consecutive numbers form one group. A group's macros are split
//! into palettes of twenty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::layout::LINE_COUNT;
use crate::config::DATA_FILE_PATTERN;
use crate::config::output::{FILES_PER_GROUP, PALETTE_SIZE};
use crate::decode::{MacroRecord, scan_file};
use crate::error::{Error, Result};
use crate::lookup::LookupTables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroEntry {
    pub index: usize,
    pub title: String,
    pub lines: [String; LINE_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub index: usize,
    pub macros: Vec<MacroEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub index: usize,
    pub name: String,
    pub palettes: Vec<Palette>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MacroBook {
    pub groups: Vec<Group>,
}

impl MacroBook {
    pub fn macro_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.palettes)
            .map(|p| p.macros.len())
            .sum()
    }
}

/// File number of a data file name such as `mcr12.dat`; `mcr.dat` is 0.
pub fn file_number(name: &str) -> Result<u32> {
    let lower = name.to_ascii_lowercase();
    let digits = lower
        .strip_prefix("mcr")
        .and_then(|rest| rest.strip_suffix(".dat"))
        .ok_or_else(|| Error::InvalidFileName(name.to_string()))?;

    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidFileName(name.to_string()));
    }
    digits
        .parse()
        .map_err(|_| Error::InvalidFileName(name.to_string()))
}

/// Paths in `dir` whose file names match `pattern`.
///
/// `dir` is escaped so that glob metacharacters in it match literally.
pub(crate) fn glob_in(dir: &Path, pattern: &str) -> Result<glob::Paths> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = Path::new(&escaped).join(pattern);
    Ok(glob::glob(&full.to_string_lossy())?)
}

/// Data files in `dir` (`mcr*.dat`) with their file numbers, in ascending
/// number order.
///
/// Fails if `dir` itself cannot be read.
pub fn discover_data_files<P: AsRef<Path>>(dir: P) -> Result<Vec<(u32, PathBuf)>> {
    let dir = dir.as_ref();
    fs::read_dir(dir)?;

    let mut files = Vec::new();
    for entry in glob_in(dir, DATA_FILE_PATTERN)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match file_number(name) {
            Ok(number) => files.push((number, path)),
            Err(e) => warn!("Skipping {:?}: {}", path, e),
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(files)
}

/// Group index of a data file number.
pub fn group_of(file_number: u32) -> u32 {
    file_number / FILES_PER_GROUP
}

/// Decode every data file in `dir` and accumulate records per group.
pub fn collect_groups<P: AsRef<Path>>(
    dir: P,
    tables: &LookupTables,
) -> Result<BTreeMap<u32, Vec<MacroRecord>>> {
    let mut groups: BTreeMap<u32, Vec<MacroRecord>> = BTreeMap::new();

    for (number, path) in discover_data_files(dir)? {
        let records = scan_file(&path, tables);
        debug!("{:?}: {} macros", path, records.len());
        groups.entry(group_of(number)).or_default().extend(records);
    }

    Ok(groups)
}

/// Arrange grouped records into the document structure.
///
/// Groups are indexed from 1 in ascending group order and named from
/// `names`, falling back to `Group N` when no title exists.
pub fn arrange(groups: BTreeMap<u32, Vec<MacroRecord>>, names: &[String]) -> MacroBook {
    let groups = groups
        .into_iter()
        .enumerate()
        .map(|(i, (group, records))| Group {
            index: i + 1,
            name: names
                .get(group as usize)
                .cloned()
                .unwrap_or_else(|| format!("Group {}", group + 1)),
            palettes: paginate(records),
        })
        .collect();

    MacroBook { groups }
}

fn paginate(records: Vec<MacroRecord>) -> Vec<Palette> {
    let mut palettes: Vec<Palette> = Vec::new();

    for (i, record) in records.into_iter().enumerate() {
        if i % PALETTE_SIZE == 0 {
            palettes.push(Palette {
                index: palettes.len() + 1,
                macros: Vec::with_capacity(PALETTE_SIZE),
            });
        }
        if let Some(palette) = palettes.last_mut() {
            palette.macros.push(MacroEntry {
                index: i % PALETTE_SIZE + 1,
                title: record.title,
                lines: record.lines,
            });
        }
    }

    palettes
}

/// Decode a macro directory into a book.
pub fn build_book<P: AsRef<Path>>(
    dir: P,
    tables: &LookupTables,
    names: &[String],
) -> Result<MacroBook> {
    let groups = collect_groups(dir, tables)?;
    let book = arrange(groups, names);
    info!(
        "Decoded {} macros in {} groups",
        book.macro_count(),
        book.groups.len()
    );
    Ok(book)
}
