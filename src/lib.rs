//! fileeq - Logical equality for files
//!
//! Decides whether two files hold the same content, where CSV and Parquet
//! files are compared as tables: row order, column order and file metadata
//! do not matter, and a CSV can be compared against a Parquet file. Any other
//! format is compared byte for byte.
//!
//! ```no_run
//! use fileeq::{compare, CompareOptions};
//!
//! # fn main() -> fileeq::Result<()> {
//! if compare("before.csv", "after.parquet", &CompareOptions::default())? {
//!     println!("same data");
//! }
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use compare::{compare, LogicalComparator, Strategy, Verdict};
pub use config::{CompareOptions, CrossFormat, MissingCapability};
pub use error::{CompareError, Result};
pub use model::Table;
