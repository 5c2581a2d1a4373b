//! Column metadata and type information

/// Inferred cell type for a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellType {
    #[default]
    Null,
    Bool,
    Int,
    Float,
    String,
}

impl CellType {
    /// Widen the type to accommodate another type.
    ///
    /// Int and Float widen to Float; any other disagreement falls back to
    /// String, the only type every cell can be represented as.
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            (CellType::Int, CellType::Float) | (CellType::Float, CellType::Int) => CellType::Float,
            _ => CellType::String,
        }
    }
}

/// Column metadata
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name (from header or schema)
    pub name: String,
    /// Column index (0-based position in the source file)
    pub index: usize,
    /// Type shared by every non-null cell of the column
    pub inferred_type: CellType,
}

impl Column {
    /// Create a new column with name and index
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: CellType::Null,
        }
    }

    /// Create a column with a specified type
    pub fn with_type(name: impl Into<String>, index: usize, cell_type: CellType) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: cell_type,
        }
    }

    /// Name used for a column when headers are ignored
    pub fn positional_name(index: usize) -> String {
        format!("column_{}", index + 1)
    }
}
