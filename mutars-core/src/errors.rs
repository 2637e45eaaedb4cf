use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutarsError {
    #[error("Required column is missing from the table: {0}")]
    MissingColumn(String),

    #[error("Column {name} has {found} values but the table has {expected} rows")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Column already exists in the table: {0}")]
    DuplicateColumn(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for mutars-core operations.
pub type Result<T> = std::result::Result<T, MutarsError>;
