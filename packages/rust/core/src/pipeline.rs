//! End-to-end run: fetch → filter → pad → finalize → write.
//!
//! The run is a strictly linear phase sequence; any phase failure terminates
//! the run. A fetch failure aborts before categories are computed, and a
//! write failure discards the fully built record without leaving a partial
//! file on disk.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};
use url::Url;

use taxsubset_fetcher::{FetchOptions, fetch_taxonomy};
use taxsubset_shared::{Result, RunConfig, TaxonomySubset, TaxsubsetError};

use crate::{curate, writer};

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Path of the written subset file.
    pub output_path: PathBuf,
    /// Number of categories in the written subset.
    pub category_count: usize,
    /// The final category list, as written.
    pub categories: Vec<String>,
    /// Whether the fallback list was consulted.
    pub padded: bool,
    /// SHA-256 hash of the fetched taxonomy body.
    pub source_hash: String,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the full pipeline.
///
/// 1. Fetch the taxonomy text
/// 2. Filter lines against the target patterns
/// 3. Pad with fallback categories if too few matched
/// 4. Sort, truncate, and write the subset JSON
#[instrument(skip_all, fields(url = %config.source_url))]
pub async fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunResult> {
    let start = Instant::now();

    info!(url = %config.source_url, "starting taxonomy subset run");

    // --- Phase 1: Fetch ---
    progress.phase("Fetching taxonomy");
    let url = Url::parse(&config.source_url).map_err(|e| {
        TaxsubsetError::config(format!("invalid source url '{}': {e}", config.source_url))
    })?;
    let opts = FetchOptions {
        timeout_secs: config.timeout_secs,
        insecure: config.insecure,
    };
    let fetched = fetch_taxonomy(&url, &opts).await?;

    // --- Phase 2: Filter ---
    progress.phase("Filtering categories");
    let filtered = curate::filter_categories(&fetched.body);
    info!(matched = filtered.len(), "taxonomy filtered");

    // --- Phase 3: Fallback padding ---
    progress.phase("Applying fallback categories");
    let (combined, padded) = curate::apply_fallbacks(filtered, config.min_categories);
    if padded {
        info!(total = combined.len(), "padded with fallback categories");
    }

    // --- Phase 4: Finalize & write ---
    progress.phase("Writing subset");
    let categories = curate::finalize_subset(combined, config.max_categories);
    let subset = TaxonomySubset::new(
        fetched.url.clone(),
        categories,
        config.description.clone(),
        config.last_updated.clone(),
    );
    writer::write_subset(&config.output_path, &subset)?;

    let result = RunResult {
        output_path: config.output_path.clone(),
        category_count: subset.count,
        categories: subset.categories,
        padded,
        source_hash: fetched.content_hash,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        count = result.category_count,
        padded = result.padded,
        path = %result.output_path.display(),
        elapsed_ms = result.elapsed.as_millis(),
        "run complete"
    );

    Ok(result)
}
