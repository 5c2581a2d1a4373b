//! Parquet file parser
//!
//! Only column names, types and values are read. File-level key-value
//! metadata, statistics, row-group layout and encodings never reach the
//! resulting [`Table`].

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Date64Array, Decimal128Array, Float16Array,
    Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array, LargeStringArray,
    StringArray, StringViewArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::datatypes::{DataType as ArrowType, TimeUnit};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::model::{CellType, CellValue, Column, Table};

use super::{Parser, TabularFormat};

/// Parser for Parquet files
pub struct ParquetParser;

impl Parser for ParquetParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .context("Failed to create Parquet reader")?;

        let schema = builder.schema().clone();
        let reader = builder.build().context("Failed to build Parquet reader")?;

        let columns: Vec<Column> = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                Column::with_type(field.name().clone(), i, arrow_type_to_cell_type(field.data_type()))
            })
            .collect();

        let mut table = Table::new(columns);

        for batch_result in reader {
            let batch = batch_result.context("Failed to read Parquet batch")?;

            let column_cells: Vec<Vec<CellValue>> = batch
                .columns()
                .iter()
                .zip(schema.fields())
                .map(|(array, field)| {
                    column_values(array)
                        .with_context(|| format!("Failed to decode column '{}'", field.name()))
                })
                .collect::<Result<_>>()?;

            for row_idx in 0..batch.num_rows() {
                let cells = column_cells
                    .iter()
                    .map(|col| col.get(row_idx).cloned().unwrap_or(CellValue::Null))
                    .collect();
                table.add_row(cells)?;
            }
        }

        Ok(table)
    }

    fn format(&self) -> TabularFormat {
        TabularFormat::Parquet
    }
}

fn arrow_type_to_cell_type(arrow_type: &ArrowType) -> CellType {
    match arrow_type {
        ArrowType::Null => CellType::Null,
        ArrowType::Boolean => CellType::Bool,
        ArrowType::Int8
        | ArrowType::Int16
        | ArrowType::Int32
        | ArrowType::Int64
        | ArrowType::UInt8
        | ArrowType::UInt16
        | ArrowType::UInt32
        | ArrowType::UInt64 => CellType::Int,
        ArrowType::Float16 | ArrowType::Float32 | ArrowType::Float64 => CellType::Float,
        ArrowType::Decimal128(_, scale) | ArrowType::Decimal256(_, scale) if *scale <= 0 => {
            CellType::Int
        }
        ArrowType::Decimal128(_, _) | ArrowType::Decimal256(_, _) => CellType::Float,
        // Dates, timestamps and nested types are rendered as text
        _ => CellType::String,
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef) -> Result<&'a T> {
    match array.as_any().downcast_ref::<T>() {
        Some(arr) => Ok(arr),
        None => bail!("array does not match its data type {}", array.data_type()),
    }
}

/// Collect every slot of a primitive-like array, mapping nulls to `CellValue::Null`
fn collect_cells<A: Array>(arr: &A, mut value: impl FnMut(&A, usize) -> CellValue) -> Vec<CellValue> {
    (0..arr.len())
        .map(|i| {
            if arr.is_null(i) {
                CellValue::Null
            } else {
                value(arr, i)
            }
        })
        .collect()
}

fn timestamp_datetime(unit: &TimeUnit, array: &ArrayRef, i: usize) -> Result<NaiveDateTime> {
    let dt = match unit {
        TimeUnit::Second => {
            DateTime::from_timestamp(downcast::<TimestampSecondArray>(array)?.value(i), 0)
        }
        TimeUnit::Millisecond => {
            DateTime::from_timestamp_millis(downcast::<TimestampMillisecondArray>(array)?.value(i))
        }
        TimeUnit::Microsecond => {
            DateTime::from_timestamp_micros(downcast::<TimestampMicrosecondArray>(array)?.value(i))
        }
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(
            downcast::<TimestampNanosecondArray>(array)?.value(i),
        )),
    };
    dt.map(|dt| dt.naive_utc()).context("timestamp out of range")
}

/// Parse a formatted decimal the way a delimited cell would be read
fn decimal_cell(text: &str) -> CellValue {
    if let Ok(i) = text.parse::<i64>() {
        CellValue::Int(i)
    } else if let Ok(f) = text.parse::<f64>() {
        CellValue::Float(f)
    } else {
        CellValue::String(text.to_string())
    }
}

/// Decimal128 with a non-positive scale is an integer: unscaled * 10^-scale
fn integral_decimal(unscaled: i128, scale: i8) -> CellValue {
    let exp = u32::from(scale.unsigned_abs());
    let value = 10i128.checked_pow(exp).and_then(|m| unscaled.checked_mul(m));
    match value.and_then(|v| i64::try_from(v).ok()) {
        Some(i) => CellValue::Int(i),
        None => CellValue::Float(unscaled as f64 * 10f64.powi(exp as i32)),
    }
}

fn formatted_cells(
    array: &ArrayRef,
    convert: impl Fn(&str) -> CellValue,
) -> Result<Vec<CellValue>> {
    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())
        .context("Unsupported column type")?;
    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                CellValue::Null
            } else {
                convert(&formatter.value(i).to_string())
            }
        })
        .collect())
}

/// Decode one arrow column into cells
fn column_values(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let cells = match array.data_type() {
        ArrowType::Null => vec![CellValue::Null; array.len()],
        ArrowType::Boolean => {
            collect_cells(downcast::<BooleanArray>(array)?, |a, i| CellValue::Bool(a.value(i)))
        }
        ArrowType::Int8 => {
            collect_cells(downcast::<Int8Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::Int16 => {
            collect_cells(downcast::<Int16Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::Int32 => {
            collect_cells(downcast::<Int32Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::Int64 => {
            collect_cells(downcast::<Int64Array>(array)?, |a, i| CellValue::Int(a.value(i)))
        }
        ArrowType::UInt8 => {
            collect_cells(downcast::<UInt8Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::UInt16 => {
            collect_cells(downcast::<UInt16Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::UInt32 => {
            collect_cells(downcast::<UInt32Array>(array)?, |a, i| CellValue::Int(a.value(i) as i64))
        }
        ArrowType::UInt64 => collect_cells(downcast::<UInt64Array>(array)?, |a, i| {
            let v = a.value(i);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Int)
        }),
        ArrowType::Float16 => collect_cells(downcast::<Float16Array>(array)?, |a, i| {
            CellValue::Float(a.value(i).to_f64())
        }),
        ArrowType::Float32 => collect_cells(downcast::<Float32Array>(array)?, |a, i| {
            CellValue::Float(a.value(i) as f64)
        }),
        ArrowType::Float64 => {
            collect_cells(downcast::<Float64Array>(array)?, |a, i| CellValue::Float(a.value(i)))
        }
        ArrowType::Utf8 => collect_cells(downcast::<StringArray>(array)?, |a, i| {
            CellValue::String(a.value(i).to_string())
        }),
        ArrowType::LargeUtf8 => collect_cells(downcast::<LargeStringArray>(array)?, |a, i| {
            CellValue::String(a.value(i).to_string())
        }),
        ArrowType::Utf8View => collect_cells(downcast::<StringViewArray>(array)?, |a, i| {
            CellValue::String(a.value(i).to_string())
        }),
        ArrowType::Date32 => collect_cells(downcast::<Date32Array>(array)?, |a, i| {
            let days = a.value(i);
            // 719_163 days from 0001-01-01 to the unix epoch
            match days
                .checked_add(719_163)
                .and_then(NaiveDate::from_num_days_from_ce_opt)
            {
                Some(date) => CellValue::String(date.format("%Y-%m-%d").to_string()),
                None => CellValue::Int(days as i64),
            }
        }),
        ArrowType::Date64 => collect_cells(downcast::<Date64Array>(array)?, |a, i| {
            let millis = a.value(i);
            match DateTime::from_timestamp_millis(millis) {
                Some(dt) => CellValue::String(dt.date_naive().format("%Y-%m-%d").to_string()),
                None => CellValue::Int(millis),
            }
        }),
        ArrowType::Timestamp(unit, _) => {
            let mut cells = Vec::with_capacity(array.len());
            for i in 0..array.len() {
                if array.is_null(i) {
                    cells.push(CellValue::Null);
                    continue;
                }
                let dt = timestamp_datetime(unit, array, i)?;
                cells.push(CellValue::String(dt.to_string()));
            }
            cells
        }
        ArrowType::Decimal128(_, scale) if *scale <= 0 => {
            let scale = *scale;
            collect_cells(downcast::<Decimal128Array>(array)?, |a, i| {
                integral_decimal(a.value(i), scale)
            })
        }
        ArrowType::Decimal128(_, _) | ArrowType::Decimal256(_, _) => {
            formatted_cells(array, decimal_cell)?
        }
        _ => formatted_cells(array, |text| CellValue::String(text.to_string()))?,
    };

    Ok(cells)
}
