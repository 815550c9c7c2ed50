//! CLI argument parsing tests.
//!
//! These parse argument vectors against the real `Args` definition without
//! touching the file system.

#[path = "../src/cli.rs"]
#[allow(dead_code)]
mod cli;

use std::path::PathBuf;

use clap::Parser;
use cli::{Args, FormatArg};
use macrobook_core::OutputFormat;

#[test]
fn test_parse_directory_only() {
    let args = Args::try_parse_from(["macrobook", "USER/abc123"]).unwrap();
    assert_eq!(args.directory, PathBuf::from("USER/abc123"));
    assert_eq!(
        args.auto_trans,
        PathBuf::from("resources_yaml/data/auto_translates.yaml")
    );
    assert_eq!(args.items, PathBuf::from("resources_yaml/data/items.yaml"));
    assert_eq!(args.output, PathBuf::from("mc.yaml"));
    assert_eq!(args.format, FormatArg::Yaml);
}

#[test]
fn test_parse_missing_directory() {
    assert!(Args::try_parse_from(["macrobook"]).is_err());
}

#[test]
fn test_parse_short_flags() {
    let args = Args::try_parse_from([
        "macrobook", "dir", "-a", "at.yaml", "-i", "items.json", "-o", "out.json", "-f", "json",
    ])
    .unwrap();
    assert_eq!(args.auto_trans, PathBuf::from("at.yaml"));
    assert_eq!(args.items, PathBuf::from("items.json"));
    assert_eq!(args.output, PathBuf::from("out.json"));
    assert_eq!(args.format, FormatArg::Json);
}

#[test]
fn test_parse_long_flags() {
    let args = Args::try_parse_from([
        "macrobook",
        "dir",
        "--auto-trans",
        "a.yaml",
        "--items",
        "i.yaml",
        "--output",
        "book.yaml",
    ])
    .unwrap();
    assert_eq!(args.auto_trans, PathBuf::from("a.yaml"));
    assert_eq!(args.items, PathBuf::from("i.yaml"));
    assert_eq!(args.output, PathBuf::from("book.yaml"));
}

#[test]
fn test_parse_invalid_format() {
    assert!(Args::try_parse_from(["macrobook", "dir", "--format", "xml"]).is_err());
}

#[test]
fn test_into_config() {
    let args = Args::try_parse_from(["macrobook", "dir", "-f", "json"]).unwrap();
    let config = args.into_config();
    assert_eq!(config.directory, PathBuf::from("dir"));
    assert_eq!(config.format, OutputFormat::Json);
}
