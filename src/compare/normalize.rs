//! Canonical, order-insensitive table representation

use rustc_hash::FxHashMap;

use crate::config::CompareOptions;
use crate::model::{KeyBuilder, RowKey, Table};

/// A table reduced to what logical equality depends on: the canonical
/// column names (absent when headers are ignored) and the multiset of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedForm {
    /// Sorted column names, `None` when headers are ignored
    column_names: Option<Vec<String>>,
    column_count: usize,
    row_count: usize,
    /// Row key -> multiplicity
    rows: FxHashMap<RowKey, usize>,
}

impl NormalizedForm {
    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of distinct rows
    pub fn distinct_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Canonical column order: by name (ties keep source order) or positional
fn canonical_order(table: &Table, options: &CompareOptions) -> Vec<usize> {
    let mut order: Vec<usize> = (0..table.column_count()).collect();
    if !options.ignore_headers {
        order.sort_by(|&a, &b| table.columns[a].name.cmp(&table.columns[b].name));
    }
    order
}

/// Normalize a table for comparison
pub fn normalize(table: &Table, options: &CompareOptions) -> NormalizedForm {
    let order = canonical_order(table, options);

    let column_names = if options.ignore_headers {
        None
    } else {
        Some(order.iter().map(|&i| table.columns[i].name.clone()).collect())
    };

    let key_builder = KeyBuilder::new().with_columns(order);
    let mut rows: FxHashMap<RowKey, usize> = FxHashMap::default();
    for row in &table.rows {
        *rows.entry(key_builder.build_key(row)).or_insert(0) += 1;
    }

    NormalizedForm {
        column_names,
        column_count: table.column_count(),
        row_count: table.row_count(),
        rows,
    }
}

/// Compare two normalized forms
pub fn equal(left: &NormalizedForm, right: &NormalizedForm) -> bool {
    if left.column_count != right.column_count {
        log::debug!(
            "Column count differs: {} vs {}",
            left.column_count,
            right.column_count
        );
        return false;
    }
    if left.column_names != right.column_names {
        log::debug!("Column names differ");
        return false;
    }
    if left.row_count != right.row_count {
        log::debug!("Row count differs: {} vs {}", left.row_count, right.row_count);
        return false;
    }
    left.rows == right.rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn table(names: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, n)| Column::new(*n, i))
            .collect();
        let mut table = Table::new(columns);
        for cells in rows {
            table.add_row(cells).unwrap();
        }
        table
    }

    fn ints(values: &[i64]) -> Vec<CellValue> {
        values.iter().map(|&v| CellValue::Int(v)).collect()
    }

    fn same(a: &Table, b: &Table, options: &CompareOptions) -> bool {
        equal(&normalize(a, options), &normalize(b, options))
    }

    #[test]
    fn test_row_order_is_ignored() {
        let a = table(&["x", "y"], vec![ints(&[1, 2]), ints(&[3, 4])]);
        let b = table(&["x", "y"], vec![ints(&[3, 4]), ints(&[1, 2])]);
        assert!(same(&a, &b, &CompareOptions::default()));
    }

    #[test]
    fn test_column_order_is_ignored() {
        let a = table(&["x", "y"], vec![ints(&[1, 2])]);
        let b = table(&["y", "x"], vec![ints(&[2, 1])]);
        assert!(same(&a, &b, &CompareOptions::default()));
    }

    #[test]
    fn test_duplicates_count() {
        let a = table(&["v"], vec![vec!["A".into()], vec!["A".into()]]);
        let b = table(&["v"], vec![vec!["A".into()]]);
        assert!(!same(&a, &b, &CompareOptions::default()));

        // same row count, different multiplicities
        let c = table(&["v"], vec![vec!["A".into()], vec!["A".into()], vec!["B".into()]]);
        let d = table(&["v"], vec![vec!["A".into()], vec!["B".into()], vec!["B".into()]]);
        assert!(!same(&c, &d, &CompareOptions::default()));
    }

    #[test]
    fn test_header_mismatch() {
        let a = table(&["x", "y"], vec![ints(&[1, 2])]);
        let b = table(&["p", "q"], vec![ints(&[1, 2])]);
        assert!(!same(&a, &b, &CompareOptions::default()));

        let options = CompareOptions::default().with_ignore_headers(true);
        assert!(same(&a, &b, &options));
    }

    #[test]
    fn test_ignore_headers_compares_positionally() {
        let a = table(&["x", "y"], vec![ints(&[1, 2])]);
        let b = table(&["y", "x"], vec![ints(&[2, 1])]);
        let options = CompareOptions::default().with_ignore_headers(true);
        assert!(!same(&a, &b, &options));
    }

    #[test]
    fn test_numeric_cross_type() {
        let a = table(&["v"], vec![vec![CellValue::Int(5)]]);
        let b = table(&["v"], vec![vec![CellValue::Float(5.0)]]);
        assert!(same(&a, &b, &CompareOptions::default()));

        let c = table(&["v"], vec![vec![CellValue::Float(5.000_000_1)]]);
        assert!(!same(&a, &c, &CompareOptions::default()));
    }

    #[test]
    fn test_null_differs_from_empty_string() {
        let a = table(&["v"], vec![vec![CellValue::Null]]);
        let b = table(&["v"], vec![vec!["".into()]]);
        assert!(!same(&a, &b, &CompareOptions::default()));
    }

    #[test]
    fn test_column_count_mismatch_without_rows() {
        let a = table(&["x"], vec![]);
        let b = table(&["x", "y"], vec![]);
        let options = CompareOptions::default().with_ignore_headers(true);
        assert!(!same(&a, &b, &options));
    }

    #[test]
    fn test_normalized_form_counts() {
        let a = table(&["b", "a"], vec![ints(&[1, 2]), ints(&[1, 2]), ints(&[3, 4])]);
        let form = normalize(&a, &CompareOptions::default());
        assert_eq!(form.column_names(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(form.row_count(), 3);
        assert_eq!(form.distinct_rows(), 2);
    }
}
