//! Identifier → display string tables used to resolve escape tokens.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Mapping from a numeric identifier to its display text.
///
/// Table files are YAML (or JSON) mappings such as:
///
/// ```yaml
/// 1: Hello
/// 5: Potion
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: HashMap<u32, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a YAML or JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            Error::LookupParse { .. } => Error::LookupParse {
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Load a table, falling back to an empty one on any failure.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(table) => {
                info!("Loaded {} entries from {:?}", table.len(), path);
                table
            }
            Err(e) => {
                warn!("Failed to load lookup table {:?}: {}", path, e);
                Self::new()
            }
        }
    }

    /// Parse a table from YAML (or JSON) text.
    ///
    /// Keys must be integers or integer strings; entries with other keys or
    /// non-scalar values are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;
        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            // Empty document
            Value::Null => return Ok(Self::new()),
            _ => {
                return Err(Error::LookupParse {
                    path: Default::default(),
                });
            }
        };

        let mut entries = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Some(id) = parse_key(&key) else {
                debug!("Skipping lookup entry with non-numeric key: {:?}", key);
                continue;
            };
            let Some(text) = scalar_to_string(value) else {
                debug!("Skipping lookup entry {} with non-scalar value", id);
                continue;
            };
            entries.insert(id, text);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.entries.get(&id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(id, s)| (id, s.into())).collect(),
        }
    }
}

fn parse_key(key: &Value) -> Option<u32> {
    match key {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The two tables consulted while decoding a line.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    /// Auto-translate phrases, referenced by discriminator 0x02.
    pub auto_translate: LookupTable,
    /// Item names, referenced by discriminators 0x07 and 0x0A.
    pub items: LookupTable,
}

impl LookupTables {
    pub fn new(auto_translate: LookupTable, items: LookupTable) -> Self {
        Self {
            auto_translate,
            items,
        }
    }

    /// Load both tables; a table that fails to load is left empty.
    pub fn load_or_empty<P: AsRef<Path>, Q: AsRef<Path>>(auto_translate: P, items: Q) -> Self {
        Self {
            auto_translate: LookupTable::load_or_empty(auto_translate),
            items: LookupTable::load_or_empty(items),
        }
    }
}
