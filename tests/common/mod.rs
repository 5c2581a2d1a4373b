//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory holding the files a test compares
pub struct Fixture {
    pub temp_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file with raw content
    pub fn file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("failed to write fixture");
        path
    }

    /// Sample fruit table used across the CSV and Parquet tests
    pub fn fruit_csv(&self, name: &str) -> PathBuf {
        self.file(name, FRUIT_CSV)
    }
}

pub const FRUIT_CSV: &str = "id,fruit,price\n1,apple,0.5\n2,banana,0.25\n3,cherry,3\n";

/// Same data as `FRUIT_CSV`: padded cells, shuffled rows, reordered columns
pub const FRUIT_CSV_REFORMATTED: &str =
    "price, id ,fruit\n3 ,3, cherry\n0.5,1,apple\n0.25, 2,banana\n";

#[cfg(feature = "parquet")]
pub mod parquet_fixtures {
    use std::collections::HashMap;
    use std::fs::File;
    use std::path::Path;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use parquet::basic::Compression;
    use parquet::file::properties::WriterProperties;

    /// Rows of the fruit table, in `FRUIT_CSV` order
    pub fn fruit_columns() -> Vec<(&'static str, ArrayRef)> {
        vec![
            ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
            (
                "fruit",
                Arc::new(StringArray::from(vec!["apple", "banana", "cherry"])) as ArrayRef,
            ),
            ("price", Arc::new(Float64Array::from(vec![0.5, 0.25, 3.0])) as ArrayRef),
        ]
    }

    pub fn write(
        path: &Path,
        columns: Vec<(&str, ArrayRef)>,
        metadata: HashMap<String, String>,
        props: Option<WriterProperties>,
    ) {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields).with_metadata(metadata));
        let arrays = columns.into_iter().map(|(_, a)| a).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, props).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    /// Plain parquet file with no extra metadata
    pub fn write_plain(path: &Path, columns: Vec<(&str, ArrayRef)>) {
        write(path, columns, HashMap::new(), None);
    }

    /// Same data with key-value metadata, compression and tiny row groups
    pub fn write_with_metadata(path: &Path, columns: Vec<(&str, ArrayRef)>) {
        let mut metadata = HashMap::new();
        metadata.insert("origin".to_string(), "fixture".to_string());
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .set_max_row_group_size(1)
            .set_created_by("another writer".to_string())
            .build();
        write(path, columns, metadata, Some(props));
    }

    pub fn ints(values: Vec<i64>) -> ArrayRef {
        Arc::new(Int64Array::from(values))
    }

    pub fn strings(values: Vec<&str>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }
}
