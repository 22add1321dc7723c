pub mod error;
pub mod json;
pub mod recorded;

use crate::domain::feature::FeatureRecord;
use crate::domain::opinion::AiOpinion;
use crate::domain::sentiment::SentimentRecord;
use crate::llm::error::OpinionError;

#[derive(Debug, Clone)]
pub struct OpinionRequest {
    pub feature: FeatureRecord,
    pub sentiment: SentimentRecord,
}

/// Source of per-symbol AI opinions. Transport, prompting, timeouts and retries live
/// behind this trait; callers only see a validated opinion or the reason there is none.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn analyze(&self, request: OpinionRequest) -> Result<AiOpinion, OpinionError>;
}
