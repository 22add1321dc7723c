use serde::{Deserialize, Deserializer, Serialize};

/// Per-symbol technical/fundamental snapshot handed over by the market-data provider.
///
/// Numeric fields that arrive as `null` or are absent deserialize as NaN and are
/// repaired by [`FeatureRecord::sanitize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub symbol: String,
    pub sector: String,
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub current_price: f64,
    /// Fractional day-over-day change (0.01 = +1%).
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub price_change: f64,
    /// Current volume over the 20-day average.
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub volume_ratio: f64,
    /// Annualized standard deviation of returns.
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub volatility: f64,
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub market_cap: f64,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default = "missing", deserialize_with = "nan_if_null")]
    pub rsi: f64,
}

fn missing() -> f64 {
    f64::NAN
}

fn nan_if_null<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
}

impl FeatureRecord {
    /// Returns a copy with anomalous fields defaulted, plus the names of the fields that
    /// were touched. Upstream providers are unreliable, so this never fails.
    pub fn sanitize(&self) -> (FeatureRecord, Vec<&'static str>) {
        let mut out = self.clone();
        let mut touched = Vec::new();

        if !out.rsi.is_finite() {
            out.rsi = 50.0;
            touched.push("rsi");
        } else if !(0.0..=100.0).contains(&out.rsi) {
            out.rsi = out.rsi.clamp(0.0, 100.0);
            touched.push("rsi");
        }

        if !out.volume_ratio.is_finite() || out.volume_ratio < 0.0 {
            out.volume_ratio = 1.0;
            touched.push("volume_ratio");
        }

        if !out.price_change.is_finite() {
            out.price_change = 0.0;
            touched.push("price_change");
        }

        if !out.volatility.is_finite() || out.volatility < 0.0 {
            out.volatility = 0.0;
            touched.push("volatility");
        }

        if !out.market_cap.is_finite() || out.market_cap < 0.0 {
            out.market_cap = 0.0;
            touched.push("market_cap");
        }

        // Screening drops zero-priced symbols; the builder still scores them.
        if !out.current_price.is_finite() || out.current_price <= 0.0 {
            out.current_price = 0.0;
            touched.push("current_price");
        }

        if out.pe_ratio.is_some_and(|v| !v.is_finite()) {
            out.pe_ratio = None;
            touched.push("pe_ratio");
        }

        if out.beta.is_some_and(|v| !v.is_finite()) {
            out.beta = None;
            touched.push("beta");
        }

        (out, touched)
    }

    pub fn has_valid_price(&self) -> bool {
        self.current_price.is_finite() && self.current_price > 0.0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::FeatureRecord;

    pub fn feature(symbol: &str) -> FeatureRecord {
        FeatureRecord {
            symbol: symbol.to_string(),
            sector: "BANKING".to_string(),
            current_price: 100.0,
            price_change: 0.0,
            volume_ratio: 1.0,
            volatility: 0.2,
            market_cap: 0.0,
            pe_ratio: None,
            beta: None,
            rsi: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::feature;
    use super::*;

    #[test]
    fn clean_record_is_untouched() {
        let f = feature("HDFCBANK.NS");
        let (out, touched) = f.sanitize();
        assert_eq!(out, f);
        assert!(touched.is_empty());
    }

    #[test]
    fn defaults_anomalous_fields() {
        let f = FeatureRecord {
            rsi: f64::NAN,
            volume_ratio: -3.0,
            price_change: f64::INFINITY,
            volatility: f64::NAN,
            market_cap: -1.0,
            current_price: -10.0,
            pe_ratio: Some(f64::NAN),
            beta: Some(f64::NEG_INFINITY),
            ..feature("BAD")
        };

        let (out, touched) = f.sanitize();
        assert_eq!(out.rsi, 50.0);
        assert_eq!(out.volume_ratio, 1.0);
        assert_eq!(out.price_change, 0.0);
        assert_eq!(out.volatility, 0.0);
        assert_eq!(out.market_cap, 0.0);
        assert_eq!(out.current_price, 0.0);
        assert_eq!(out.pe_ratio, None);
        assert_eq!(out.beta, None);
        assert_eq!(touched.len(), 8);
        assert!(!out.has_valid_price());
    }

    #[test]
    fn clamps_out_of_range_rsi() {
        let (out, touched) = FeatureRecord { rsi: 140.0, ..feature("X") }.sanitize();
        assert_eq!(out.rsi, 100.0);
        assert_eq!(touched, vec!["rsi"]);

        let (out, _) = FeatureRecord { rsi: -4.0, ..feature("X") }.sanitize();
        assert_eq!(out.rsi, 0.0);
    }

    #[test]
    fn missing_optionals_deserialize_as_none() {
        let v = serde_json::json!({
            "symbol": "TCS.NS",
            "sector": "INFORMATION_TECHNOLOGY",
            "current_price": 3500.0,
            "price_change": 0.01,
            "volume_ratio": 1.1,
            "volatility": 0.25,
            "market_cap": 1.2e13,
            "rsi": 55.0
        });
        let f: FeatureRecord = serde_json::from_value(v).unwrap();
        assert_eq!(f.pe_ratio, None);
        assert_eq!(f.beta, None);
    }

    #[test]
    fn null_and_absent_numbers_are_repaired_by_sanitize() {
        let v = serde_json::json!({
            "symbol": "SBIN.NS",
            "sector": "BANKING",
            "current_price": 800.0,
            "price_change": null,
            "volume_ratio": null,
            "volatility": 0.3,
            "market_cap": 7e12
        });
        let f: FeatureRecord = serde_json::from_value(v).unwrap();
        assert!(f.price_change.is_nan());
        assert!(f.rsi.is_nan());

        let (out, touched) = f.sanitize();
        assert_eq!(out.price_change, 0.0);
        assert_eq!(out.volume_ratio, 1.0);
        assert_eq!(out.rsi, 50.0);
        assert_eq!(touched, vec!["rsi", "volume_ratio", "price_change"]);
    }
}
