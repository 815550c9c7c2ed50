//! Document output for decoded macro books.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::book::{Group, MacroBook};
use crate::config::output::{TIMESTAMP_FORMAT, TIMESTAMP_UTC_OFFSET_SECS};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// `# timestamp` comment line followed by a YAML list of groups
    #[default]
    Yaml,
    /// `{ "generated_at": ..., "groups": [...] }`
    Json,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    generated_at: &'a str,
    groups: &'a [Group],
}

/// Format the run time in Japan Standard Time.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(TIMESTAMP_UTC_OFFSET_SECS) {
        Some(jst) => now.with_timezone(&jst).format(TIMESTAMP_FORMAT).to_string(),
        None => now.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Serialize `book` to `writer`.
pub fn write_book<W: Write>(
    mut writer: W,
    book: &MacroBook,
    timestamp: &str,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            writeln!(writer, "# {}", timestamp)?;
            serde_yaml::to_writer(&mut writer, book)?;
        }
        OutputFormat::Json => {
            let document = JsonDocument {
                generated_at: timestamp,
                groups: &book.groups,
            };
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Serialize `book` to a file, replacing any existing content.
pub fn write_book_to_file<P: AsRef<Path>>(
    path: P,
    book: &MacroBook,
    timestamp: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_book(&mut writer, book, timestamp, format)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{MacroEntry, Palette};
    use chrono::TimeZone;
    use std::str::FromStr;

    fn sample_book() -> MacroBook {
        MacroBook {
            groups: vec![Group {
                index: 1,
                name: "白魔道士".to_string(),
                palettes: vec![Palette {
                    index: 1,
                    macros: vec![MacroEntry {
                        index: 1,
                        title: "Heal".to_string(),
                        lines: [
                            "/item 【Potion】 <me>".to_string(),
                            "/wait 1".to_string(),
                            String::new(),
                            String::new(),
                            String::new(),
                            String::new(),
                        ],
                    }],
                }],
            }],
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_book(&mut out, &sample_book(), "2026-01-02 03:04:05", format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_timestamp_jst() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 20, 30, 0).unwrap();
        assert_eq!(format_timestamp(now), "2026-01-02 05:30:00");
    }

    #[test]
    fn test_yaml_header_and_order() {
        let yaml = render(OutputFormat::Yaml);
        let mut lines = yaml.lines();
        assert_eq!(lines.next(), Some("# 2026-01-02 03:04:05"));

        let index = yaml.find("index:").unwrap();
        let name = yaml.find("name:").unwrap();
        let palettes = yaml.find("palettes:").unwrap();
        let title = yaml.find("title:").unwrap();
        let macro_lines = yaml.find("lines:").unwrap();
        assert!(index < name && name < palettes);
        assert!(title < macro_lines);
    }

    #[test]
    fn test_yaml_keeps_non_ascii() {
        let yaml = render(OutputFormat::Yaml);
        assert!(yaml.contains("白魔道士"));
        assert!(yaml.contains("【Potion】"));
    }

    #[test]
    fn test_yaml_parses_back() {
        let yaml = render(OutputFormat::Yaml);
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let group = &value[0];
        assert_eq!(group["name"].as_str(), Some("白魔道士"));
        let entry = &group["palettes"][0]["macros"][0];
        assert_eq!(entry["title"].as_str(), Some("Heal"));
        assert_eq!(entry["lines"][1].as_str(), Some("/wait 1"));
        assert_eq!(entry["lines"].as_sequence().map(|s| s.len()), Some(6));
    }

    #[test]
    fn test_json_document() {
        let json = render(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generated_at"], "2026-01-02 03:04:05");
        assert_eq!(value["groups"][0]["palettes"][0]["macros"][0]["index"], 1);
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_write_book_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mc.yaml");
        write_book_to_file(&path, &MacroBook::default(), "ts", OutputFormat::Yaml).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# ts\n"));
    }
}
