use crate::domain::contract::LlmOpinionPayload;
use crate::domain::opinion::AiOpinion;
use crate::llm::error::OpinionError;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Strip Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.split_once('\n').map(|(_, rest)| rest) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Best-effort: first '{' to last '}'.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

/// Turns raw LLM output into a validated opinion. Prose without a JSON object is
/// rejected rather than guessed at.
pub fn parse_opinion(text: &str) -> Result<AiOpinion, OpinionError> {
    let Some(json_str) = extract_json(text) else {
        return Err(OpinionError::Unparseable {
            detail: "no JSON object in LLM output".to_string(),
            raw_output: Some(text.to_string()),
        });
    };

    let payload = serde_json::from_str::<LlmOpinionPayload>(&json_str).map_err(|e| {
        OpinionError::Unparseable {
            detail: format!("LLM output does not match opinion schema: {e}"),
            raw_output: Some(text.to_string()),
        }
    })?;

    payload.validate_and_into_opinion()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opinion::Action;

    #[test]
    fn extract_json_handles_fenced_blocks() {
        let body = "{\"a\":1}";
        let fenced = format!("```json\n{body}\n```\n");
        assert_eq!(extract_json(&fenced), Some(body.to_string()));
    }

    #[test]
    fn extract_json_falls_back_to_braces() {
        let s = "Here is my analysis: {\"a\":1} hope it helps";
        assert_eq!(extract_json(s), Some("{\"a\":1}".to_string()));
        assert_eq!(extract_json("no braces at all"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn parse_opinion_accepts_wrapped_json() {
        let text = "Sure!\n```json\n{\"ai_score\": 68, \"recommendation\": \"BUY\", \"confidence\": \"Medium\", \"investment_thesis\": \"Margin expansion\"}\n```";
        let opinion = parse_opinion(text).unwrap();
        assert_eq!(opinion.ai_score, 68.0);
        assert_eq!(opinion.recommendation, Action::Buy);
        assert_eq!(opinion.investment_thesis, "Margin expansion");
    }

    #[test]
    fn parse_opinion_rejects_prose() {
        let err = parse_opinion("I would BUY this stock.").unwrap_err();
        assert!(matches!(err, OpinionError::Unparseable { .. }));
        assert_eq!(err.raw_output(), Some("I would BUY this stock."));
    }

    #[test]
    fn parse_opinion_rejects_schema_mismatch() {
        let err = parse_opinion("{\"score\": 80}").unwrap_err();
        assert!(matches!(err, OpinionError::Unparseable { .. }));
    }

    #[test]
    fn parse_opinion_surfaces_validation_errors() {
        let err = parse_opinion("{\"ai_score\": -4, \"recommendation\": \"SELL\"}").unwrap_err();
        assert!(matches!(err, OpinionError::Invalid(_)));
    }
}
