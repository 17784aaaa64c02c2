use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No capture rate for year {year}, month {month}")]
    Lookup { year: u32, month: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
