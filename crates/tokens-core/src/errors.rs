use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Variable not found: {0}")]
    NotFound(String),
    #[error("Variable {variable} has no value for mode {mode}")]
    NoValueForMode { variable: String, mode: String },
    #[error("Alias chain starting at {0} exceeds the maximum depth of {1}")]
    AliasDepthExceeded(String, usize),
    #[error("Unsupported variable type: {0}")]
    UnsupportedType(String),
    #[error("Value of {variable} does not match its declared type '{expected}'")]
    TypeMismatch {
        variable: String,
        expected: &'static str,
    },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("Invalid token tree: {0}")]
    InvalidTree(String),
    #[error("Snapshot source failed: {0}")]
    Transport(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
