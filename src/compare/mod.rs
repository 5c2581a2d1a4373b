//! Logical equality engine
//!
//! [`LogicalComparator`] decides, for a pair of files, which comparison
//! applies: a short-circuit (same file, empty files), a byte comparison, or
//! loading both files as tables and comparing their normalized forms.

pub mod binary;
pub mod normalize;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{CompareOptions, CrossFormat, MissingCapability};
use crate::error::{CompareError, Result};
use crate::parser::{normalized_extension, FileKind, ParserFactory, TabularFormat};

pub use normalize::{equal, normalize, NormalizedForm};

/// How a verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Both paths resolve to the same file
    SameFile,
    /// At least one file has zero bytes
    Empty,
    /// Extensions that cannot be compared with each other
    FormatMismatch,
    /// Byte-exact comparison
    Binary,
    /// Normalized table comparison
    Tabular,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::SameFile => write!(f, "same file"),
            Strategy::Empty => write!(f, "empty file"),
            Strategy::FormatMismatch => write!(f, "format mismatch"),
            Strategy::Binary => write!(f, "binary"),
            Strategy::Tabular => write!(f, "tabular"),
        }
    }
}

/// Result of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub equal: bool,
    pub strategy: Strategy,
}

impl Verdict {
    fn new(equal: bool, strategy: Strategy) -> Self {
        Self { equal, strategy }
    }
}

/// A resolved input path
#[derive(Debug)]
struct InputFile<'a> {
    path: &'a Path,
    canonical: PathBuf,
    extension: String,
    len: u64,
}

impl<'a> InputFile<'a> {
    /// Resolve a path; anything that is not an existing, readable regular file
    /// is `FileNotFound`
    fn resolve(path: &'a Path) -> Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CompareError::file_not_found(path))
            }
            Err(e) => return Err(CompareError::io(path, e)),
        };
        if !metadata.is_file() {
            return Err(CompareError::file_not_found(path));
        }
        match fs::File::open(path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(CompareError::file_not_found(path))
            }
            Err(e) => return Err(CompareError::io(path, e)),
        }

        let canonical = fs::canonicalize(path).map_err(|e| CompareError::io(path, e))?;

        Ok(Self {
            path,
            canonical,
            extension: normalized_extension(path),
            len: metadata.len(),
        })
    }
}

/// Equality dispatcher. Holds no per-call state, so one instance can be
/// shared freely.
pub struct LogicalComparator {
    options: CompareOptions,
    parsers: ParserFactory,
}

impl LogicalComparator {
    pub fn new(options: CompareOptions) -> Self {
        Self::with_parsers(options, ParserFactory::new())
    }

    /// Use a custom parser set, e.g. to simulate a build without Parquet support
    pub fn with_parsers(options: CompareOptions, parsers: ParserFactory) -> Self {
        Self { options, parsers }
    }

    /// Compare two files and report how the verdict was reached
    pub fn compare(&self, left: &Path, right: &Path) -> Result<Verdict> {
        let left = InputFile::resolve(left)?;
        let right = InputFile::resolve(right)?;

        if left.canonical == right.canonical {
            log::debug!("{} and {} are the same file", left.path.display(), right.path.display());
            return Ok(Verdict::new(true, Strategy::SameFile));
        }

        match (left.len, right.len) {
            (0, 0) => return Ok(Verdict::new(true, Strategy::Empty)),
            (0, _) | (_, 0) => return Ok(Verdict::new(false, Strategy::Empty)),
            _ => {}
        }

        let left_kind = FileKind::classify(&left.extension, &self.options);
        let right_kind = FileKind::classify(&right.extension, &self.options);
        log::debug!(
            "Classified {} as {:?} and {} as {:?}",
            left.path.display(),
            left_kind,
            right.path.display(),
            right_kind
        );

        match (left_kind, right_kind) {
            (FileKind::Tabular(lf), FileKind::Tabular(rf)) => {
                if lf != rf && self.options.cross_format == CrossFormat::Disabled {
                    return Ok(Verdict::new(false, Strategy::FormatMismatch));
                }
                self.compare_tabular(&left, lf, &right, rf)
            }
            _ if left.extension != right.extension => {
                Ok(Verdict::new(false, Strategy::FormatMismatch))
            }
            _ => self.compare_binary(&left, &right),
        }
    }

    fn compare_binary(&self, left: &InputFile<'_>, right: &InputFile<'_>) -> Result<Verdict> {
        if left.len != right.len {
            return Ok(Verdict::new(false, Strategy::Binary));
        }
        let equal = binary::files_identical(left.path, right.path)?;
        Ok(Verdict::new(equal, Strategy::Binary))
    }

    fn compare_tabular(
        &self,
        left: &InputFile<'_>,
        left_format: TabularFormat,
        right: &InputFile<'_>,
        right_format: TabularFormat,
    ) -> Result<Verdict> {
        // Capability is checked before any file is parsed
        let available = self
            .parsers
            .ensure_available(left_format)
            .and_then(|_| self.parsers.ensure_available(right_format));

        if let Err(err) = available {
            return match self.options.missing_capability {
                MissingCapability::Fail => Err(err),
                MissingCapability::BinaryFallback => {
                    log::warn!("{}; falling back to binary comparison", err);
                    self.compare_binary(left, right)
                }
            };
        }

        let left_table = self.parsers.load(left.path, left_format, &self.options)?;
        let right_table = self.parsers.load(right.path, right_format, &self.options)?;

        let left_form = normalize(&left_table, &self.options);
        let right_form = normalize(&right_table, &self.options);

        Ok(Verdict::new(equal(&left_form, &right_form), Strategy::Tabular))
    }
}

/// Check whether two files are logically equal
pub fn compare(
    left: impl AsRef<Path>,
    right: impl AsRef<Path>,
    options: &CompareOptions,
) -> Result<bool> {
    LogicalComparator::new(options.clone())
        .compare(left.as_ref(), right.as_ref())
        .map(|v| v.equal)
}
