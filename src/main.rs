//! slircstats - Straylight IRC log statistics
//!
//! Reads the configured chat logs, aggregates them and reports a summary.

use slirc_stats::config::{Config, validation};
use slirc_stats::stats::aggregate::TopTokenArray;
use slirc_stats::telemetry::spans;
use slirc_stats::{IngestReport, Ingestor, Stats, StatsLimits};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Render the first `n` leaderboard entries as `token(count)` pairs.
fn leaders(top: &TopTokenArray, n: usize) -> String {
    top.iter()
        .take(n)
        .map(|entry| format!("{}({})", entry.token, entry.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn report(stats: &Stats, top: usize) {
    for network in stats.networks() {
        info!(
            users = network.user_count(),
            "{network}"
        );

        for channel in network
            .channel_ids()
            .iter()
            .filter_map(|id| stats.channel_by_id(*id))
        {
            info!(
                network = %network.name(),
                users = channel.user_ids().len(),
                peak_hour = ?channel.hourly().peak_hour(),
                topic = channel.topic().unwrap_or(""),
                "{channel}"
            );
            info!(channel = %channel.name(), "Top words: {}", leaders(channel.words().top(), top));
            info!(channel = %channel.name(), "Top URLs: {}", leaders(channel.urls().top(), top));
            info!(channel = %channel.name(), "Top streaks: {}", leaders(channel.streaks().top(), top));
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slircstats.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, code = e.error_code(), error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validation::validate(&config) {
        for e in &errors {
            error!(code = e.error_code(), error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "{} configuration error(s) in {}",
            errors.len(),
            config_path
        ));
    }

    info!(
        sources = config.source.len(),
        top_words = config.limits.top_words,
        quotes = config.limits.quotes,
        "Starting slircstats"
    );

    let mut stats = Stats::with_limits(StatsLimits::from(&config.limits));
    let mut total = IngestReport::default();

    for source in &config.source {
        let _span = spans::source(&source.format, Some(source.channel.as_str())).entered();

        let Some(scanner) = source.scanner() else {
            error!(file = %source.file, format = %source.format, "Unknown log format, skipping source");
            continue;
        };

        let report = Ingestor::new(&mut stats)
            .ingest_file(&scanner, &source.file)
            .map_err(|e| {
                error!(file = %source.file, code = e.error_code(), error = %e, "Ingestion failed");
                e
            })?;
        if report.malformed > 0 {
            warn!(file = %source.file, malformed = report.malformed, "Source had malformed lines");
        }
        total.merge(&report);
    }

    if config.ingest.credit_open_streaks {
        stats.finish();
    }

    info!(
        lines = total.lines,
        stored = total.stored,
        skipped = total.skipped,
        malformed = total.malformed,
        "{}",
        stats.summary()
    );
    report(&stats, config.output.report_top);

    if let Some(ref path) = config.output.snapshot {
        stats.save(path).map_err(|e| {
            error!(path = %path, code = e.error_code(), error = %e, "Failed to write snapshot");
            e
        })?;
    }

    Ok(())
}
