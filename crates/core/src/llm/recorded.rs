use crate::domain::opinion::AiOpinion;
use crate::llm::error::OpinionError;
use crate::llm::json;
use crate::llm::{LlmClient, OpinionRequest};
use std::collections::HashMap;

/// Replays raw LLM responses captured upstream, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct RecordedLlmClient {
    responses: HashMap<String, String>,
}

impl RecordedLlmClient {
    pub fn new(responses: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.responses.contains_key(symbol)
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordedLlmClient {
    fn provider(&self) -> &'static str {
        "recorded"
    }

    async fn analyze(&self, request: OpinionRequest) -> Result<AiOpinion, OpinionError> {
        let symbol = &request.feature.symbol;
        let raw = self.responses.get(symbol).ok_or_else(|| OpinionError::Missing {
            symbol: symbol.clone(),
        })?;

        let res = json::parse_opinion(raw);
        if let Err(err) = &res {
            tracing::warn!(symbol = %symbol, provider = self.provider(), error = %err, "recorded LLM response rejected");
        }
        res
    }
}
