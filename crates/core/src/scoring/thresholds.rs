use crate::domain::opinion::{Action, Confidence};

/// Breakpoints shared by both fusers, evaluated top-down; first match wins.
const TABLE: [(f64, Action, Confidence); 4] = [
    (70.0, Action::Buy, Confidence::High),
    (55.0, Action::Buy, Confidence::Medium),
    (45.0, Action::Hold, Confidence::Medium),
    (30.0, Action::Sell, Confidence::Medium),
];

pub fn classify(score: f64) -> (Action, Confidence) {
    TABLE
        .iter()
        .find(|(floor, _, _)| score >= *floor)
        .map(|(_, action, confidence)| (*action, *confidence))
        .unwrap_or((Action::Sell, Confidence::High))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints() {
        assert_eq!(classify(100.0), (Action::Buy, Confidence::High));
        assert_eq!(classify(70.0), (Action::Buy, Confidence::High));
        assert_eq!(classify(69.99), (Action::Buy, Confidence::Medium));
        assert_eq!(classify(55.0), (Action::Buy, Confidence::Medium));
        assert_eq!(classify(54.99), (Action::Hold, Confidence::Medium));
        assert_eq!(classify(45.0), (Action::Hold, Confidence::Medium));
        assert_eq!(classify(44.99), (Action::Sell, Confidence::Medium));
        assert_eq!(classify(30.0), (Action::Sell, Confidence::Medium));
        assert_eq!(classify(29.99), (Action::Sell, Confidence::High));
        assert_eq!(classify(0.0), (Action::Sell, Confidence::High));
    }

    #[test]
    fn partition_is_total_and_monotonic() {
        // Walking up the range, the bucket index never decreases.
        let rank = |c: (Action, Confidence)| match c {
            (Action::Sell, Confidence::High) => 0,
            (Action::Sell, _) => 1,
            (Action::Hold, _) => 2,
            (Action::Buy, Confidence::Medium) => 3,
            (Action::Buy, _) => 4,
        };
        let mut prev = 0;
        for i in 0..=10_000 {
            let score = f64::from(i) / 100.0;
            let r = rank(classify(score));
            assert!(r >= prev, "bucket went down at {score}");
            prev = r;
        }
        assert_eq!(prev, 4);
    }

    #[test]
    fn nan_falls_to_lowest_bucket() {
        assert_eq!(classify(f64::NAN), (Action::Sell, Confidence::High));
    }
}
