use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tally_order::{app_config::Config, OrderMonetarySummaryFormatter, OrderTotalResolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about = env!("CARGO_PKG_DESCRIPTION"), version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// JSON document holding an order record
    order: PathBuf,

    /// Treat the document as a resolver parent value with a "model" key
    #[arg(long)]
    parent: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally_cli=info,tally_order=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = Config::load().context("Failed to load config")?;
    let resolver = OrderTotalResolver::new(OrderMonetarySummaryFormatter::new(config.formatter));

    let raw = std::fs::read_to_string(&args.order)
        .with_context(|| format!("Failed to read {}", args.order.display()))?;
    let document: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.order.display()))?;

    let summary = if args.parent {
        resolver.resolve(&document)
    } else {
        resolver.resolve_model(Some(&document))
    };

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Cannot summarize {}: {}", args.order.display(), e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Summarized {}: grand total {} ({} taxes, {} discounts)",
        args.order.display(),
        summary.grand_total,
        summary.taxes.len(),
        summary.discounts.len()
    );

    let output = if args.compact {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    println!("{}", output);

    Ok(())
}
