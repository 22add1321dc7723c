use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
        }
    }
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Action::Buy),
            "HOLD" => Ok(Action::Hold),
            "SELL" => Ok(Action::Sell),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

// Confidence and risk share the Low/Medium/High vocabulary.
fn parse_level(s: &str) -> Option<u8> {
    match s.trim().to_ascii_lowercase().as_str() {
        "low" => Some(0),
        "medium" | "moderate" => Some(1),
        "high" => Some(2),
        _ => None,
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_level(s) {
            Some(0) => Ok(Confidence::Low),
            Some(1) => Ok(Confidence::Medium),
            Some(_) => Ok(Confidence::High),
            None => Err(format!("unknown confidence: {}", s.trim())),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_level(s) {
            Some(0) => Ok(RiskLevel::Low),
            Some(1) => Ok(RiskLevel::Medium),
            Some(_) => Ok(RiskLevel::High),
            None => Err(format!("unknown risk level: {}", s.trim())),
        }
    }
}

/// Validated opinion from the external LLM collaborator.
///
/// Only `ai_score`, `recommendation`, `confidence` and `investment_thesis` feed the
/// hybrid fusion; the rest are advisory and copied into the final record as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiOpinion {
    /// In [0, 100].
    pub ai_score: f64,
    pub recommendation: Action,
    pub confidence: Confidence,
    pub investment_thesis: String,
    pub target_price: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub time_horizon: Option<String>,
    pub catalysts: Vec<String>,
    pub risks: Vec<String>,
    pub technical_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("buy".parse::<Action>().unwrap(), Action::Buy);
        assert_eq!(" Sell ".parse::<Action>().unwrap(), Action::Sell);
        assert!("STRONG BUY".parse::<Action>().is_err());

        assert_eq!("HIGH".parse::<Confidence>().unwrap(), Confidence::High);
        assert_eq!("moderate".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn serializes_with_display_spelling() {
        assert_eq!(serde_json::to_value(Action::Hold).unwrap(), "HOLD");
        assert_eq!(serde_json::to_value(Confidence::Medium).unwrap(), "Medium");
        assert_eq!(serde_json::to_value(RiskLevel::Low).unwrap(), "Low");
    }
}
