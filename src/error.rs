use thiserror::Error;

/// Errors surfaced to callers of the parsing and aggregation API
#[derive(Error, Debug)]
pub enum KondateError {
    /// Non-empty input produced no ingredient at all
    #[error("Could not recognize any ingredients; check the format")]
    NothingRecognized,

    /// An ingredient failed the schema check
    #[error("Invalid ingredient: {0}")]
    InvalidIngredient(#[from] ValidationError),

    /// Malformed JSON input or output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Some ingredients failed the schema check
    #[error("{failed} of {total} ingredients are invalid")]
    ValidationFailed { failed: usize, total: usize },

    /// Bad command-line usage
    #[error("{0}")]
    Usage(String),
}

/// Reasons an ingredient record does not satisfy the recipe schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ingredient name is empty")]
    EmptyName,

    #[error("amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    #[error("unit is {len} characters long (max {max})")]
    UnitTooLong { len: usize, max: usize },

    #[error("note is {len} characters long (max {max})")]
    NoteTooLong { len: usize, max: usize },
}
