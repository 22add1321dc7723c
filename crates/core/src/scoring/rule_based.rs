use crate::config::RuleWeights;
use crate::domain::recommendation::ComponentScores;
use crate::scoring::{clamp_score, thresholds, Fusion};

/// Weighted-sum fusion used when no AI opinion is available.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedFuser {
    weights: RuleWeights,
}

impl RuleBasedFuser {
    pub fn new(weights: RuleWeights) -> Self {
        Self { weights }
    }

    pub fn composite(&self, c: &ComponentScores) -> f64 {
        let w = &self.weights;
        clamp_score(
            c.sentiment_component * w.sentiment
                + c.technical_component * w.technical
                + c.fundamental_component * w.fundamental
                + c.news_coverage_component * w.news_coverage,
        )
    }

    pub fn fuse(&self, components: &ComponentScores) -> Fusion {
        let score = self.composite(components);
        let (action, confidence) = thresholds::classify(score);
        Fusion {
            score,
            action,
            confidence,
            reasoning: reasoning(components),
        }
    }
}

fn reasoning(c: &ComponentScores) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if c.sentiment_component > 60.0 {
        parts.push("positive news sentiment");
    } else if c.sentiment_component < 40.0 {
        parts.push("negative news sentiment");
    }

    if c.technical_component > 60.0 {
        parts.push("strong technical indicators");
    } else if c.technical_component < 40.0 {
        parts.push("weak technical indicators");
    }

    if c.fundamental_component > 60.0 {
        parts.push("solid fundamentals");
    }

    if parts.is_empty() {
        "Mixed signals".to_string()
    } else {
        format!("Based on {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opinion::{Action, Confidence};

    fn components(sentiment: f64, technical: f64, fundamental: f64, news: f64) -> ComponentScores {
        ComponentScores {
            sentiment_component: sentiment,
            technical_component: technical,
            fundamental_component: fundamental,
            news_coverage_component: news,
        }
    }

    #[test]
    fn weighted_sum() {
        let fuser = RuleBasedFuser::default();
        let fusion = fuser.fuse(&components(50.0, 100.0, 85.0, 0.0));
        assert!((fusion.score - 67.0).abs() < 1e-9);
        assert_eq!((fusion.action, fusion.confidence), (Action::Buy, Confidence::Medium));

        let fusion = fuser.fuse(&components(50.0, 70.0, 50.0, 0.0));
        assert!((fusion.score - 51.0).abs() < 1e-9);
        assert_eq!((fusion.action, fusion.confidence), (Action::Hold, Confidence::Medium));
    }

    #[test]
    fn extremes_classify_at_both_ends() {
        let fuser = RuleBasedFuser::default();
        let top = fuser.fuse(&components(100.0, 100.0, 100.0, 100.0));
        assert_eq!(top.score, 100.0);
        assert_eq!((top.action, top.confidence), (Action::Buy, Confidence::High));

        let bottom = fuser.fuse(&components(0.0, 0.0, 0.0, 0.0));
        assert_eq!(bottom.score, 0.0);
        assert_eq!((bottom.action, bottom.confidence), (Action::Sell, Confidence::High));
    }

    #[test]
    fn oversized_weights_still_clamp() {
        let fuser = RuleBasedFuser::new(RuleWeights {
            sentiment: 1.0,
            technical: 1.0,
            fundamental: 1.0,
            news_coverage: 1.0,
        });
        assert_eq!(fuser.composite(&components(90.0, 90.0, 90.0, 90.0)), 100.0);
    }

    #[test]
    fn reasoning_clauses() {
        let fuser = RuleBasedFuser::default();
        assert_eq!(
            fuser.fuse(&components(70.0, 85.0, 85.0, 0.0)).reasoning,
            "Based on positive news sentiment, strong technical indicators, solid fundamentals"
        );
        assert_eq!(
            fuser.fuse(&components(25.0, 30.0, 50.0, 0.0)).reasoning,
            "Based on negative news sentiment, weak technical indicators"
        );
        assert_eq!(fuser.fuse(&components(50.0, 50.0, 50.0, 0.0)).reasoning, "Mixed signals");
    }

    #[test]
    fn composite_depends_only_on_own_inputs() {
        let fuser = RuleBasedFuser::default();
        let inputs = [
            components(10.0, 20.0, 30.0, 40.0),
            components(90.0, 70.0, 60.0, 10.0),
            components(50.0, 50.0, 50.0, 50.0),
        ];
        let forward: Vec<f64> = inputs.iter().map(|c| fuser.composite(c)).collect();
        let mut backward: Vec<f64> = inputs.iter().rev().map(|c| fuser.composite(c)).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }
}
