//! CLI argument definitions for macrobook.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use macrobook_core::BookConfig;
use macrobook_core::OutputFormat;
use macrobook_core::config::{DEFAULT_AUTO_TRANS_PATH, DEFAULT_ITEMS_PATH, DEFAULT_OUTPUT_PATH};

#[derive(Debug, Parser)]
#[command(name = "macrobook")]
#[command(about = "Convert mcr*.dat macro files into a macro book document", version)]
pub struct Args {
    /// Directory containing mcr*.dat and mcr*.ttl
    pub directory: PathBuf,

    /// Auto-translate lookup table (YAML or JSON)
    #[arg(short, long, env = "MACROBOOK_AUTO_TRANS", default_value = DEFAULT_AUTO_TRANS_PATH)]
    pub auto_trans: PathBuf,

    /// Item lookup table (YAML or JSON)
    #[arg(short, long, env = "MACROBOOK_ITEMS", default_value = DEFAULT_ITEMS_PATH)]
    pub items: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: FormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Args {
    pub fn into_config(self) -> BookConfig {
        BookConfig {
            directory: self.directory,
            auto_trans_path: self.auto_trans,
            items_path: self.items,
            output_path: self.output,
            format: self.format.into(),
        }
    }
}
