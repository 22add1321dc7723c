use crate::domain::feature::FeatureRecord;
use crate::domain::sentiment::{ScoredArticle, SentimentRecord};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One analysis cycle's worth of upstream data, as handed to the batch runner.
/// Items stay untyped until [`AnalysisBatchInput::into_valid_items`] so one malformed
/// symbol cannot reject the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBatchInput {
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInput {
    pub feature: FeatureRecord,
    /// Pre-aggregated sentiment. Takes precedence over `articles`.
    #[serde(default)]
    pub sentiment: Option<SentimentRecord>,
    #[serde(default)]
    pub articles: Vec<ScoredArticle>,
    /// Raw LLM output captured for this symbol, if the AI step ran upstream.
    #[serde(default)]
    pub ai_response: Option<String>,
}

impl SymbolInput {
    pub fn symbol(&self) -> &str {
        &self.feature.symbol
    }

    /// `None` means sentiment is unavailable for this symbol, which is distinct from
    /// "no news" (an explicit record with zero articles).
    pub fn resolve_sentiment(&self) -> Option<SentimentRecord> {
        if let Some(s) = &self.sentiment {
            return Some(s.clone());
        }
        if !self.articles.is_empty() {
            return Some(SentimentRecord::aggregate(&self.articles));
        }
        None
    }
}

impl AnalysisBatchInput {
    /// Drops malformed or invalid items and repeated symbols (first occurrence wins)
    /// instead of failing the whole batch.
    pub fn into_valid_items(self) -> Vec<SymbolInput> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(self.items.len());

        for (index, raw) in self.items.into_iter().enumerate() {
            let symbol = raw_symbol(&raw).unwrap_or("<unknown>").to_string();
            let item = match serde_json::from_value::<SymbolInput>(raw) {
                Ok(item) => item,
                Err(err) => {
                    tracing::warn!(index, %symbol, error = %err, "skipping malformed input item");
                    continue;
                }
            };
            if let Err(err) = validate_item(&item) {
                tracing::warn!(symbol = %item.symbol(), error = %err, "skipping invalid input item");
                continue;
            }
            if !seen.insert(item.symbol().trim().to_string()) {
                tracing::warn!(symbol = %item.symbol(), "skipping duplicate symbol");
                continue;
            }
            out.push(item);
        }

        out
    }
}

fn raw_symbol(raw: &Value) -> Option<&str> {
    raw.get("feature")?.get("symbol")?.as_str()
}

pub fn validate_item(item: &SymbolInput) -> Result<()> {
    anyhow::ensure!(!item.feature.symbol.trim().is_empty(), "symbol must be non-empty");
    anyhow::ensure!(!item.feature.sector.trim().is_empty(), "sector must be non-empty");
    Ok(())
}
