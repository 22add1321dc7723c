use anyhow::Context;
use std::path::Path;
use stockpulse_core::domain::recommendation::RecommendationBatch;
use stockpulse_core::ingest::types::AnalysisBatchInput;

pub async fn load_batch_input(path: &Path) -> anyhow::Result<AnalysisBatchInput> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read batch input {}", path.display()))?;

    let input = serde_json::from_str::<AnalysisBatchInput>(&text)
        .with_context(|| format!("batch input {} does not match the expected shape", path.display()))?;

    tracing::info!(
        path = %path.display(),
        as_of_date = ?input.as_of_date,
        items = input.items.len(),
        "loaded batch input"
    );
    Ok(input)
}

pub async fn save_batch(path: &Path, batch: &RecommendationBatch) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(batch).context("failed to serialize recommendation batch")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), run_id = %batch.run_id, items = batch.items.len(), "saved recommendation batch");
    Ok(())
}
