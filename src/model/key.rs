//! Composite row keys for order-insensitive comparison

use super::table::{CellValue, Row};

/// Type-tagged, hashable form of a cell.
///
/// Equal cells produce equal keys and distinct cells distinct keys. Floats
/// with an exact i64 value become `Int`, so numeric equality holds across
/// integer and float columns without any tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalCell {
    Null,
    Bool(bool),
    Int(i64),
    /// Bit pattern of a non-integral float; all NaNs share one pattern
    Float(u64),
    Str(String),
}

/// Canonical cells of one row, in canonical column order
pub type RowKey = Vec<CanonicalCell>;

// 2^63 as f64; i64::MAX itself is not representable
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl CanonicalCell {
    fn from_float(f: f64) -> Self {
        if f.is_nan() {
            return CanonicalCell::Float(f64::NAN.to_bits());
        }
        if f.fract() == 0.0 && f >= -I64_BOUND && f < I64_BOUND {
            // also folds -0.0 into 0
            return CanonicalCell::Int(f as i64);
        }
        CanonicalCell::Float(f.to_bits())
    }
}

impl From<&CellValue> for CanonicalCell {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Null => CanonicalCell::Null,
            CellValue::Bool(b) => CanonicalCell::Bool(*b),
            CellValue::Int(i) => CanonicalCell::Int(*i),
            CellValue::Float(f) => CanonicalCell::from_float(*f),
            CellValue::String(s) => CanonicalCell::Str(s.clone()),
        }
    }
}

/// Builder for computing composite keys
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    column_indices: Vec<usize>,
}

impl KeyBuilder {
    /// Create a new key builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key columns by index, in the order cells should appear in the key
    pub fn with_columns(mut self, indices: Vec<usize>) -> Self {
        self.column_indices = indices;
        self
    }

    /// Build a key from a row. Without key columns every cell is used in row order.
    pub fn build_key(&self, row: &Row) -> RowKey {
        if self.column_indices.is_empty() {
            row.cells.iter().map(CanonicalCell::from).collect()
        } else {
            self.column_indices
                .iter()
                .map(|&i| row.get(i).map_or(CanonicalCell::Null, CanonicalCell::from))
                .collect()
        }
    }
}
