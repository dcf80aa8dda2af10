//! Subset serialization and file output.
//!
//! The subset is written as 2-space-indented JSON with non-ASCII characters
//! left unescaped, via a sibling temp file and rename so a failed run never
//! leaves a truncated file behind. The parent directory is not created
//! implicitly; a missing directory surfaces as an I/O error.

use std::path::Path;

use tracing::{debug, info};

use taxsubset_shared::{Result, TaxonomySubset, TaxsubsetError};

/// Serialize `subset` and write it to `path`, replacing any existing file.
pub fn write_subset(path: &Path, subset: &TaxonomySubset) -> Result<()> {
    let json = serde_json::to_string_pretty(subset)
        .map_err(|e| TaxsubsetError::validation(format!("JSON serialization failed: {e}")))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| TaxsubsetError::validation(format!("not a file path: {}", path.display())))?
        .to_string_lossy();
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    // Write to temp file first, then atomic rename
    std::fs::write(&temp, &json).map_err(|e| TaxsubsetError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(TaxsubsetError::io(path, e));
    }

    info!(
        path = %path.display(),
        count = subset.count,
        bytes = json.len(),
        "subset written"
    );
    Ok(())
}

/// Read a subset file back and check its internal invariants.
///
/// Used by tests and for debugging a previously written file; the pipeline
/// itself trusts its own construction.
pub fn validate_subset(path: &Path) -> Result<TaxonomySubset> {
    let content = std::fs::read_to_string(path).map_err(|e| TaxsubsetError::io(path, e))?;
    let subset: TaxonomySubset = serde_json::from_str(&content)
        .map_err(|e| TaxsubsetError::validation(format!("invalid subset file: {e}")))?;

    if subset.count != subset.categories.len() {
        return Err(TaxsubsetError::validation(format!(
            "subset count mismatch: {} != {}",
            subset.count,
            subset.categories.len()
        )));
    }

    if !subset.categories.windows(2).all(|w| w[0] <= w[1]) {
        return Err(TaxsubsetError::validation(
            "subset categories are not sorted",
        ));
    }

    debug!(path = %path.display(), count = subset.count, "subset file validated");
    Ok(subset)
}
