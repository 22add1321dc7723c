use stockpulse_core::domain::opinion::Action;
use stockpulse_core::domain::recommendation::Recommendation;
use stockpulse_core::summary::BatchSummary;

const RULE_WIDE: usize = 100;
const RULE_NARROW: usize = 50;

pub fn print_summary(summary: &BatchSummary) {
    let c = &summary.counts;
    println!("\n{}", "=".repeat(RULE_NARROW));
    println!("SUMMARY STATISTICS");
    println!("{}", "=".repeat(RULE_NARROW));
    println!("Total stocks analyzed: {}", c.total);
    println!("Buy recommendations: {} ({:.1}%)", c.buy, summary.share(c.buy));
    println!("Hold recommendations: {} ({:.1}%)", c.hold, summary.share(c.hold));
    println!("Sell recommendations: {} ({:.1}%)", c.sell, summary.share(c.sell));
    println!("Average sentiment score: {:.3}", summary.avg_sentiment_score);
    println!("Average composite score: {:.1}", summary.avg_composite_score);
    println!("High confidence recommendations: {}", summary.high_confidence_count);

    if !summary.sectors.is_empty() {
        println!("\n{:<24} {:>5} {:>5} {:>5} {:>5} {:>7}", "Sector", "Total", "Buy", "Hold", "Sell", "Score");
        for (sector, s) in &summary.sectors {
            println!(
                "{:<24} {:>5} {:>5} {:>5} {:>5} {:>7.1}",
                clip(sector, 24),
                s.counts.total,
                s.counts.buy,
                s.counts.hold,
                s.counts.sell,
                s.avg_score
            );
        }
    }
}

pub fn print_recommendations(recs: &[&Recommendation]) {
    println!("\n{}", "=".repeat(RULE_WIDE));
    println!("STOCK RECOMMENDATIONS");
    println!("{}", "=".repeat(RULE_WIDE));
    println!(
        "{:<14} {:>10} {:>8} {:<10} {:>6} {:<5} {:<6} {:<6} Reasoning",
        "Symbol", "Price", "Change%", "Sentiment", "Score", "Rec", "Conf", "Risk"
    );
    println!("{}", "-".repeat(RULE_WIDE));

    for r in recs {
        let sentiment = if r.sentiment_available {
            r.sentiment.as_str()
        } else {
            "n/a"
        };
        println!(
            "{:<14} {:>10.2} {:>7.1}% {:<10} {:>6.1} {:<5} {:<6} {:<6} {}",
            clip(&r.symbol, 14),
            r.current_price,
            r.price_change * 100.0,
            sentiment,
            r.composite_score,
            r.action.as_str(),
            r.confidence.as_str(),
            r.risk_level.as_str(),
            clip(&r.reasoning, 40)
        );
    }
}

pub fn print_top_pick(recs: &[Recommendation]) {
    if let Some(top) = recs.iter().find(|r| r.action == Action::Buy) {
        println!("\nTOP BUY RECOMMENDATION:");
        println!("   {} - Score: {:.1} ({})", top.symbol, top.composite_score, top.analysis_source.as_str());
        println!("   Reasoning: {}", top.reasoning);
        println!("   Risk Level: {}", top.risk_level);
    }
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
