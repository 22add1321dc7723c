use crate::domain::opinion::{Action, Confidence};
use crate::domain::recommendation::Recommendation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub total: usize,
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

impl ActionCounts {
    fn add(&mut self, action: Action) {
        self.total += 1;
        match action {
            Action::Buy => self.buy += 1,
            Action::Hold => self.hold += 1,
            Action::Sell => self.sell += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    #[serde(flatten)]
    pub counts: ActionCounts,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    #[serde(flatten)]
    pub counts: ActionCounts,
    pub avg_sentiment_score: f64,
    pub avg_composite_score: f64,
    pub high_confidence_count: usize,
    pub sectors: BTreeMap<String, SectorSummary>,
}

impl BatchSummary {
    pub fn from_recommendations(recs: &[Recommendation]) -> Self {
        let mut counts = ActionCounts::default();
        let mut sentiment_sum = 0.0;
        let mut score_sum = 0.0;
        let mut high_confidence_count = 0;
        let mut by_sector: BTreeMap<String, (ActionCounts, f64)> = BTreeMap::new();

        for rec in recs {
            counts.add(rec.action);
            sentiment_sum += rec.sentiment_score;
            score_sum += rec.composite_score;
            if rec.confidence == Confidence::High {
                high_confidence_count += 1;
            }

            let entry = by_sector.entry(rec.sector.clone()).or_default();
            entry.0.add(rec.action);
            entry.1 += rec.composite_score;
        }

        let sectors = by_sector
            .into_iter()
            .map(|(sector, (counts, sum))| {
                let avg_score = mean(sum, counts.total);
                (sector, SectorSummary { counts, avg_score })
            })
            .collect();

        Self {
            avg_sentiment_score: mean(sentiment_sum, counts.total),
            avg_composite_score: mean(score_sum, counts.total),
            counts,
            high_confidence_count,
            sectors,
        }
    }

    pub fn share(&self, n: usize) -> f64 {
        if self.counts.total == 0 {
            0.0
        } else {
            n as f64 * 100.0 / self.counts.total as f64
        }
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Keeps the incoming (score) order; optionally filters to one action.
pub fn top_recommendations(
    recs: &[Recommendation],
    action: Option<Action>,
    limit: usize,
) -> Vec<&Recommendation> {
    recs.iter()
        .filter(|r| action.map_or(true, |a| r.action == a))
        .take(limit)
        .collect()
}
