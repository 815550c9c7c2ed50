//! Inline escape tokens.
//!
//! A token is the 6-byte window `FD kk ?? hh ll FD` where `kk` selects the
//! lookup table and `hh ll` carries the identifier.

use strum::{FromRepr, IntoStaticStr};

use crate::config::layout::ESCAPE_TOKEN_SIZE;
use crate::lookup::{LookupTable, LookupTables};

pub const TOKEN_OPEN: char = '【';
pub const TOKEN_CLOSE: char = '】';

/// Known table discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum TableKind {
    AutoTranslate = 0x02,
    Item = 0x07,
    /// Item reference whose identifier is stored in the high byte only.
    ItemHigh = 0x0A,
}

impl TableKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Identifier carried by the two id bytes of a token.
    pub fn identifier(&self, high: u8, low: u8) -> u32 {
        match self {
            Self::ItemHigh => u32::from(high) * 256,
            Self::AutoTranslate | Self::Item => u32::from(u16::from_be_bytes([high, low])),
        }
    }

    pub fn table<'a>(&self, tables: &'a LookupTables) -> &'a LookupTable {
        match self {
            Self::AutoTranslate => &tables.auto_translate,
            Self::Item | Self::ItemHigh => &tables.items,
        }
    }

    /// Tag embedded in the placeholder for a missing identifier.
    pub fn miss_tag(&self) -> &'static str {
        match self {
            Self::AutoTranslate => "0x2",
            Self::Item | Self::ItemHigh => "0x7",
        }
    }
}

/// A decoded escape token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeToken {
    /// Raw discriminator byte.
    pub kind: u8,
    pub id: u32,
}

impl EscapeToken {
    pub fn from_window(window: &[u8; ESCAPE_TOKEN_SIZE]) -> Self {
        let kind = window[1];
        let (high, low) = (window[3], window[4]);
        let id = match TableKind::from_u8(kind) {
            Some(table) => table.identifier(high, low),
            None => u32::from(u16::from_be_bytes([high, low])),
        };
        Self { kind, id }
    }

    pub fn table_kind(&self) -> Option<TableKind> {
        TableKind::from_u8(self.kind)
    }

    /// Display text for the token, without brackets.
    ///
    /// Unknown discriminators and missing identifiers produce a placeholder
    /// naming what could not be resolved.
    pub fn resolve_text(&self, tables: &LookupTables) -> String {
        match self.table_kind() {
            Some(kind) => match kind.table(tables).get(self.id) {
                Some(text) => text.to_string(),
                None => format!("{}:{}", kind.miss_tag(), self.id),
            },
            None => format!("unknown:{}:{}", self.kind, self.id),
        }
    }

    /// Display text wrapped in `【】`.
    pub fn resolve(&self, tables: &LookupTables) -> String {
        format!("{TOKEN_OPEN}{}{TOKEN_CLOSE}", self.resolve_text(tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> LookupTables {
        LookupTables::new(
            [(0x0102, "Hello")].into_iter().collect(),
            [(5, "Potion"), (0x1200, "Ether")].into_iter().collect(),
        )
    }

    #[test]
    fn test_table_kind_from_u8() {
        assert_eq!(TableKind::from_u8(0x02), Some(TableKind::AutoTranslate));
        assert_eq!(TableKind::from_u8(0x07), Some(TableKind::Item));
        assert_eq!(TableKind::from_u8(0x0A), Some(TableKind::ItemHigh));
        assert_eq!(TableKind::from_u8(0x03), None);
    }

    #[test]
    fn test_item_high_uses_first_byte_only() {
        let token = EscapeToken::from_window(&[0xFD, 0x0A, 0x00, 0x12, 0x34, 0xFD]);
        assert_eq!(token.id, 4608);
        assert_eq!(token.resolve(&tables()), "【Ether】");
    }

    #[test]
    fn test_big_endian_identifier() {
        let token = EscapeToken::from_window(&[0xFD, 0x02, 0x00, 0x01, 0x02, 0xFD]);
        assert_eq!(token.id, 0x0102);
        assert_eq!(token.resolve(&tables()), "【Hello】");
    }

    #[test]
    fn test_miss_placeholders() {
        let tables = tables();
        let auto = EscapeToken::from_window(&[0xFD, 0x02, 0x00, 0x00, 0x09, 0xFD]);
        assert_eq!(auto.resolve(&tables), "【0x2:9】");

        let item = EscapeToken::from_window(&[0xFD, 0x07, 0x00, 0x00, 0x06, 0xFD]);
        assert_eq!(item.resolve(&tables), "【0x7:6】");

        let high = EscapeToken::from_window(&[0xFD, 0x0A, 0x00, 0x01, 0xFF, 0xFD]);
        assert_eq!(high.resolve(&tables), "【0x7:256】");
    }

    #[test]
    fn test_unknown_discriminator() {
        let token = EscapeToken::from_window(&[0xFD, 0x13, 0x00, 0x00, 0x2A, 0xFD]);
        assert_eq!(token.table_kind(), None);
        assert_eq!(token.resolve(&tables()), "【unknown:19:42】");
    }

    #[test]
    fn test_tables_are_independent() {
        // Identifier 5 exists only in the item table
        let token = EscapeToken::from_window(&[0xFD, 0x02, 0x00, 0x00, 0x05, 0xFD]);
        assert_eq!(token.resolve(&tables()), "【0x2:5】");
    }
}
