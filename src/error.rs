use std::fmt::Display;

/// Custom Result type for flatbase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for flatbase
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Table name already present in the catalog
    DuplicateTable(String),
    /// Table name missing from the catalog
    UnknownTable(String),
    /// Column spec without a `name:type` separator
    InvalidColumnFormat(String),
    /// Column type outside {int, str, bool}
    InvalidColumnType(String),
    /// Insert value count differs from the schema's column count
    ArityMismatch { expected: usize, got: usize },
    /// Raw input failed coercion to the target type
    InvalidValue(String),
    /// WHERE/SET clause without an `=`
    MalformedClause(String),
    /// Malformed interactive command (rejected before reaching the core)
    Command(String),
    /// Storage error (I/O or JSON codec)
    Storage(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateTable(name) => write!(f, "table {} already exists", name),
            Error::UnknownTable(name) => write!(f, "table {} does not exist", name),
            Error::InvalidColumnFormat(spec) => {
                write!(f, "invalid column format {}, expected name:type", spec)
            }
            Error::InvalidColumnType(tag) => {
                write!(f, "invalid column type {}, expected int, str or bool", tag)
            }
            Error::ArityMismatch { expected, got } => {
                write!(f, "expected {} values, got {}", expected, got)
            }
            Error::InvalidValue(msg) => write!(f, "invalid value: {}", msg),
            Error::MalformedClause(text) => {
                write!(f, "malformed clause {}, expected column = value", text)
            }
            Error::Command(msg) => write!(f, "{}", msg),
            Error::Storage(msg) => write!(f, "storage error {}", msg),
        }
    }
}
