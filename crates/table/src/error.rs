use thiserror::Error;

/// Errors that can occur during table operations
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Row index out of bounds: {index} (table has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    #[error("Column index out of bounds: {index} (table has {count} columns)")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Duplicate column name: {name}")]
    DuplicateColumnName { name: String },

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Columns are hierarchical; flatten the header before addressing by name")]
    HierarchicalHeader,

    #[error("Table header is not hierarchical")]
    NotHierarchical,

    #[error("Collapsing {found} header levels isn't handled (expected {expected})")]
    HeaderDepth { expected: usize, found: usize },

    #[error("Key column '{key}' not found in {side}")]
    JoinKeyNotFound { key: String, side: String },

    #[error("Duplicate key {key} in {side}")]
    DuplicateKey { key: String, side: String },

    #[error("Function expects {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("No data: {0}")]
    EmptyData(String),

    #[error("Column name separator must not be empty")]
    EmptySeparator,

    #[error("Invalid column letters: {0}")]
    InvalidColumnLetters(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
