//! Taxonomy subset curation pipeline.
//!
//! Downloads the Google Product Taxonomy, filters it to a fixed set of
//! electronics branches, pads with fallback categories when the filter
//! yields too few matches, and writes the sorted, truncated subset as JSON.

pub mod curate;
pub mod pipeline;
pub mod writer;

pub use curate::{FALLBACK_CATEGORIES, apply_fallbacks, filter_categories, finalize_subset};
pub use pipeline::{ProgressReporter, RunResult, SilentProgress, run};
pub use writer::{validate_subset, write_subset};
