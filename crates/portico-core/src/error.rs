//! Error types for Portico

use thiserror::Error;

/// The main error type for Portico operations
#[derive(Debug, Error)]
pub enum PorticoError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Prefab not found: {0}")]
    PrefabNotFound(String),

    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Patch error: {0}")]
    PatchError(String),

    #[error("Duplicate item id: {0}")]
    DuplicateItemId(String),

    #[error("Invalid field type: expected {expected}, got {got}")]
    InvalidFieldType { expected: String, got: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid item key: {0}")]
    InvalidItemKey(String),
}

/// Result type alias for Portico operations
pub type Result<T> = std::result::Result<T, PorticoError>;

impl From<serde_json::Error> for PorticoError {
    fn from(err: serde_json::Error) -> Self {
        PorticoError::JsonError(err.to_string())
    }
}

impl From<toml::de::Error> for PorticoError {
    fn from(err: toml::de::Error) -> Self {
        PorticoError::TomlParseError(err.to_string())
    }
}
