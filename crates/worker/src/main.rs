use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stockpulse_core::builder::{RecommendationBuilder, SymbolAnalysis};
use stockpulse_core::domain::opinion::Action;
use stockpulse_core::domain::recommendation::RecommendationBatch;
use stockpulse_core::ingest::types::SymbolInput;
use stockpulse_core::llm::recorded::RecordedLlmClient;
use stockpulse_core::llm::{LlmClient, OpinionRequest};
use stockpulse_core::summary::{self, BatchSummary};
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod ingest;
mod report;
mod universe;

#[derive(Debug, Parser)]
#[command(name = "stockpulse_worker")]
struct Args {
    /// Batch input file (JSON) with features, sentiment and captured AI responses.
    #[arg(long)]
    input: PathBuf,

    /// Analyze only these symbols.
    #[arg(short, long, num_args = 1..)]
    symbols: Vec<String>,

    /// Analyze only this sector.
    #[arg(long)]
    sector: Option<String>,

    /// Show only BUY, HOLD or SELL recommendations.
    #[arg(short, long, value_parser = parse_action)]
    action: Option<Action>,

    /// Number of recommendations to show.
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Write the full batch as JSON to this path.
    #[arg(short = 'o', long)]
    save: Option<PathBuf>,

    #[arg(long)]
    no_summary: bool,

    /// Score every input symbol, skipping the pre-scoring screen.
    #[arg(long)]
    no_screen: bool,

    /// Ignore captured AI responses and use rule-based scoring only.
    #[arg(long)]
    rule_only: bool,

    /// Print nothing but logs.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_action(s: &str) -> Result<Action, String> {
    s.parse::<Action>()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&args, &settings).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "analysis run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(args: &Args, settings: &stockpulse_core::config::Settings) -> anyhow::Result<()> {
    let input = ingest::load_batch_input(&args.input).await?;
    let items = input.into_valid_items();

    let opts = universe::UniverseOptions {
        symbols: args.symbols.clone(),
        sector: args.sector.clone(),
        screen: !args.no_screen,
    };
    let items = universe::build_universe(items, &opts, &settings.screening);

    if items.is_empty() {
        tracing::warn!("no symbols left to analyze");
        if !args.quiet {
            println!("No stocks to analyze.");
        }
        return Ok(());
    }

    let use_ai = settings.use_ai_analysis && !args.rule_only;
    let analyses = if use_ai {
        let client = RecordedLlmClient::new(
            items
                .iter()
                .filter_map(|i| i.ai_response.clone().map(|raw| (i.symbol().to_string(), raw))),
        );
        tracing::info!(provider = client.provider(), responses = client.len(), "ai analysis enabled");
        let uncovered = uncovered_symbols(&client, &items);
        if !uncovered.is_empty() {
            tracing::warn!(symbols = ?uncovered, "no captured ai response; these fall back to rule-based");
        }
        resolve_opinions(Arc::new(client), items).await
    } else {
        tracing::info!("ai analysis disabled; rule-based scoring only");
        items
            .into_iter()
            .map(|item| SymbolAnalysis {
                sentiment: item.resolve_sentiment(),
                feature: item.feature,
                opinion: None,
            })
            .collect()
    };

    let builder = RecommendationBuilder::new(&settings.scoring);
    let batch = RecommendationBatch::new(chrono::Utc::now(), builder.build_batch(analyses));

    tracing::info!(run_id = %batch.run_id, items = batch.items.len(), "analysis run complete");

    if !args.quiet {
        if !args.no_summary {
            report::print_summary(&BatchSummary::from_recommendations(&batch.items));
        }
        let limit = args.limit.min(settings.max_recommendations);
        let shown = summary::top_recommendations(&batch.items, args.action, limit);
        report::print_recommendations(&shown);
        report::print_top_pick(&batch.items);
    }

    if let Some(path) = &args.save {
        ingest::save_batch(path, &batch).await?;
    }

    Ok(())
}

fn uncovered_symbols<'a>(client: &RecordedLlmClient, items: &'a [SymbolInput]) -> Vec<&'a str> {
    items
        .iter()
        .map(|i| i.symbol())
        .filter(|s| !client.contains(s))
        .collect()
}

/// Resolves one opinion per symbol, each on its own task. A task that fails to
/// complete drops its symbol from the batch; an opinion error is kept so the
/// builder can fall back to rule-based scoring.
async fn resolve_opinions(client: Arc<dyn LlmClient>, items: Vec<SymbolInput>) -> Vec<SymbolAnalysis> {
    let mut tasks = JoinSet::new();

    for item in items {
        let client = Arc::clone(&client);
        tasks.spawn(async move {
            let sentiment = item.resolve_sentiment();
            let request = OpinionRequest {
                feature: item.feature.clone(),
                sentiment: sentiment.clone().unwrap_or_default(),
            };
            let opinion = client.analyze(request).await;
            if let Err(err) = &opinion {
                tracing::warn!(symbol = %item.feature.symbol, error = %err, "ai opinion unavailable");
            }
            SymbolAnalysis {
                feature: item.feature,
                sentiment,
                opinion: Some(opinion),
            }
        });
    }

    let mut out = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(analysis) => out.push(analysis),
            Err(err) => tracing::error!(error = %err, "opinion task failed; symbol skipped"),
        }
    }
    out
}

fn init_sentry(settings: &stockpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
