use thiserror::Error;

/// Errors surfaced by the library.
///
/// Almost every operation is total and signals "nothing found" with an empty
/// value instead. The variants here cover `repeat`, configuration loading and
/// the scripting facade.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid count value: {0}")]
    InvalidRepeatCount(i64),

    #[error("Repeated string length overflows: {requested} copies")]
    RepeatTooLarge { requested: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, Error>;
