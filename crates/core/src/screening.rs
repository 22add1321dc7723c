use crate::config::ScreeningConfig;
use crate::domain::feature::FeatureRecord;

/// Why a symbol was screened out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenReject {
    InvalidPrice,
    SmallMarketCap,
    LowVolume,
    ExtremeMove,
    Overbought,
}

pub fn check(feature: &FeatureRecord, config: &ScreeningConfig) -> Result<(), ScreenReject> {
    if !feature.has_valid_price() {
        return Err(ScreenReject::InvalidPrice);
    }
    if feature.market_cap < config.min_market_cap {
        return Err(ScreenReject::SmallMarketCap);
    }
    if feature.volume_ratio < config.min_volume_ratio {
        return Err(ScreenReject::LowVolume);
    }
    if feature.price_change.abs() > config.max_price_change {
        return Err(ScreenReject::ExtremeMove);
    }
    if feature.rsi > config.max_rsi {
        return Err(ScreenReject::Overbought);
    }
    Ok(())
}

/// Drops symbols that fail the pre-scoring screen. Records are sanitized first so a
/// missing field is judged on its default, not on NaN.
pub fn screen(features: Vec<FeatureRecord>, config: &ScreeningConfig) -> Vec<FeatureRecord> {
    screen_by(features, config, |f| f)
}

/// Same as [`screen`] for any item that carries a feature record.
pub fn screen_by<T>(
    items: Vec<T>,
    config: &ScreeningConfig,
    feature_of: impl Fn(&T) -> &FeatureRecord,
) -> Vec<T> {
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let f = feature_of(item);
            let (clean, _) = f.sanitize();
            match check(&clean, config) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::debug!(symbol = %f.symbol, ?reason, "screened out");
                    false
                }
            }
        })
        .collect();

    tracing::info!(before, after = kept.len(), "screening complete");
    kept
}
