use stockpulse_core::config::ScreeningConfig;
use stockpulse_core::ingest::types::SymbolInput;
use stockpulse_core::screening;

#[derive(Debug, Clone, Default)]
pub struct UniverseOptions {
    /// Restrict to these symbols (case-insensitive). Empty means all.
    pub symbols: Vec<String>,

    /// Restrict to one sector (case-insensitive).
    pub sector: Option<String>,

    /// Apply the pre-scoring screen.
    pub screen: bool,
}

pub fn build_universe(
    items: Vec<SymbolInput>,
    opts: &UniverseOptions,
    screening_config: &ScreeningConfig,
) -> Vec<SymbolInput> {
    let wanted: Vec<String> = opts
        .symbols
        .iter()
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    let sector = opts
        .sector
        .as_deref()
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty());

    let selected: Vec<SymbolInput> = items
        .into_iter()
        .filter(|item| {
            wanted.is_empty() || wanted.contains(&item.feature.symbol.trim().to_ascii_uppercase())
        })
        .filter(|item| match &sector {
            Some(s) => item.feature.sector.trim().to_ascii_uppercase() == *s,
            None => true,
        })
        .collect();

    tracing::info!(
        selected = selected.len(),
        symbols = wanted.len(),
        sector = ?sector,
        "selected analysis universe"
    );

    if opts.screen {
        screening::screen_by(selected, screening_config, |item| &item.feature)
    } else {
        selected
    }
}
