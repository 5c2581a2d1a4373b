//! Delimited text parser (CSV and TSV)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{CellType, CellValue, Column, Table};

use super::{Parser, TabularFormat};

/// Parser for delimited text files. The first record is the header.
pub struct DelimitedParser {
    delimiter: u8,
    format: TabularFormat,
}

impl DelimitedParser {
    /// Comma-separated values
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            format: TabularFormat::Csv,
        }
    }

    /// Tab-separated values
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            format: TabularFormat::Tsv,
        }
    }
}

impl Parser for DelimitedParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().context("Failed to read header row")?.clone();

        let mut records = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            // +2 for 1-indexing and header
            let record = result.with_context(|| format!("Failed to read row {}", line_num + 2))?;
            records.push(record);
        }

        // Type inference needs the whole column before any cell is converted
        let types: Vec<CellType> = (0..headers.len())
            .map(|i| infer_column_type(records.iter().filter_map(|r| r.get(i))))
            .collect();

        let columns = headers
            .iter()
            .zip(&types)
            .enumerate()
            .map(|(i, (name, ty))| Column::with_type(name, i, *ty))
            .collect();

        let mut table = Table::new(columns);
        for record in &records {
            let cells = record
                .iter()
                .zip(&types)
                .map(|(raw, ty)| convert_cell(raw, *ty))
                .collect();
            table.add_row(cells)?;
        }

        Ok(table)
    }

    fn format(&self) -> TabularFormat {
        self.format
    }
}

/// Narrowest type a single raw cell fits
fn classify_cell(s: &str) -> CellType {
    if s.is_empty() {
        CellType::Null
    } else if s.parse::<i64>().is_ok() {
        CellType::Int
    } else if s.parse::<f64>().is_ok() {
        CellType::Float
    } else if parse_bool(s).is_some() {
        CellType::Bool
    } else {
        CellType::String
    }
}

/// Narrowest type consistent with every cell of a column
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> CellType {
    cells.fold(CellType::Null, |acc, s| acc.widen(classify_cell(s)))
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Convert a raw (already trimmed) cell to the column's type.
/// Empty cells are always null.
fn convert_cell(s: &str, ty: CellType) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }

    let converted = match ty {
        CellType::Int => s.parse::<i64>().ok().map(CellValue::Int),
        CellType::Float => s.parse::<f64>().ok().map(CellValue::Float),
        CellType::Bool => parse_bool(s).map(CellValue::Bool),
        CellType::Null | CellType::String => None,
    };

    converted.unwrap_or_else(|| CellValue::String(s.to_string()))
}
