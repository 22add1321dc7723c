use thiserror::Error;

/// Why an AI opinion could not be used. Consumed by the builder's fallback branch;
/// never surfaced to callers of the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpinionError {
    #[error("LLM output is not a usable opinion: {detail}")]
    Unparseable {
        detail: String,
        raw_output: Option<String>,
    },

    #[error("invalid opinion: {0}")]
    Invalid(String),

    #[error("no opinion recorded for {symbol}")]
    Missing { symbol: String },
}

impl OpinionError {
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            OpinionError::Unparseable { raw_output, .. } => raw_output.as_deref(),
            _ => None,
        }
    }
}
