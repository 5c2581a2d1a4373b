//! Parser layer for reading tabular data formats

mod csv;
#[cfg(feature = "parquet")]
mod parquet;

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::CompareOptions;
use crate::error::CompareError;
use crate::model::Table;

pub use self::csv::DelimitedParser;
#[cfg(feature = "parquet")]
pub use self::parquet::ParquetParser;

/// Tabular formats the loader knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabularFormat {
    Csv,
    Tsv,
    Parquet,
}

impl TabularFormat {
    /// Cargo feature that provides the parser for this format, if optional
    pub fn feature(self) -> Option<&'static str> {
        match self {
            TabularFormat::Csv | TabularFormat::Tsv => None,
            TabularFormat::Parquet => Some("parquet"),
        }
    }
}

impl std::fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabularFormat::Csv => write!(f, "CSV"),
            TabularFormat::Tsv => write!(f, "TSV"),
            TabularFormat::Parquet => write!(f, "Parquet"),
        }
    }
}

/// How a file is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Binary,
    Tabular(TabularFormat),
}

impl FileKind {
    /// Classify a normalized extension. Anything unrecognized is `Binary`.
    pub fn classify(extension: &str, options: &CompareOptions) -> FileKind {
        match extension {
            "csv" => FileKind::Tabular(TabularFormat::Csv),
            "tsv" if options.recognize_tsv => FileKind::Tabular(TabularFormat::Tsv),
            "parquet" => FileKind::Tabular(TabularFormat::Parquet),
            _ => FileKind::Binary,
        }
    }
}

/// Lower-cased extension without the leading dot, empty when there is none
pub fn normalized_extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// The format this parser reads
    fn format(&self) -> TabularFormat;
}

/// Registry of the parsers compiled into this build
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all available parsers
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut parsers: Vec<Box<dyn Parser>> =
            vec![Box::new(DelimitedParser::csv()), Box::new(DelimitedParser::tsv())];

        #[cfg(feature = "parquet")]
        parsers.push(Box::new(ParquetParser));

        Self { parsers }
    }

    /// Create a factory with an explicit parser set
    pub fn with_parsers(parsers: Vec<Box<dyn Parser>>) -> Self {
        Self { parsers }
    }

    /// Get the parser for a format, or `CapabilityUnavailable`
    pub fn get_parser(&self, format: TabularFormat) -> Result<&dyn Parser, CompareError> {
        self.parsers
            .iter()
            .find(|p| p.format() == format)
            .map(|p| p.as_ref())
            .ok_or(CompareError::CapabilityUnavailable {
                format,
                feature: format.feature().unwrap_or("default"),
            })
    }

    /// Check that a format can be loaded without reading any file
    pub fn ensure_available(&self, format: TabularFormat) -> Result<(), CompareError> {
        self.get_parser(format).map(|_| ())
    }

    /// Load a file as a table.
    ///
    /// With `ignore_headers` the column names are replaced by positional names.
    pub fn load(
        &self,
        path: &Path,
        format: TabularFormat,
        options: &CompareOptions,
    ) -> Result<Table, CompareError> {
        let parser = self.get_parser(format)?;
        let mut table = parser
            .parse(path)
            .map_err(|e| CompareError::unreadable(path, format, e))?;

        if options.ignore_headers {
            table.use_positional_names();
        }

        log::debug!(
            "Loaded {} file {} ({} columns, {} rows)",
            format,
            path.display(),
            table.column_count(),
            table.row_count()
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let options = CompareOptions::default();
        assert_eq!(
            FileKind::classify("csv", &options),
            FileKind::Tabular(TabularFormat::Csv)
        );
        assert_eq!(
            FileKind::classify("parquet", &options),
            FileKind::Tabular(TabularFormat::Parquet)
        );
        assert_eq!(FileKind::classify("tsv", &options), FileKind::Binary);
        assert_eq!(FileKind::classify("bin", &options), FileKind::Binary);
        assert_eq!(FileKind::classify("", &options), FileKind::Binary);

        let options = options.with_recognize_tsv(true);
        assert_eq!(
            FileKind::classify("tsv", &options),
            FileKind::Tabular(TabularFormat::Tsv)
        );
    }

    #[test]
    fn test_normalized_extension() {
        assert_eq!(normalized_extension(Path::new("data/File.CSV")), "csv");
        assert_eq!(normalized_extension(Path::new("a.tar.Parquet")), "parquet");
        assert_eq!(normalized_extension(Path::new("Makefile")), "");
    }

    #[test]
    fn test_missing_parser_is_capability_unavailable() {
        let factory = ParserFactory::with_parsers(vec![Box::new(DelimitedParser::csv())]);
        assert!(factory.ensure_available(TabularFormat::Csv).is_ok());

        let err = factory
            .ensure_available(TabularFormat::Parquet)
            .unwrap_err();
        assert!(err.is_capability_unavailable());
        assert!(err.to_string().contains("parquet"));
    }
}
