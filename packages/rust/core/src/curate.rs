//! Category curation: line filtering, fallback padding, and final ordering.
//!
//! Taxonomy lines are opaque `>`-delimited path strings. They are never
//! parsed into structured fields; matching, equality, and ordering all
//! operate on the raw string form.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Anchored prefix patterns selecting the electronics branches we keep.
///
/// Tested in order against each line; matching short-circuits on the first
/// hit, so a line is kept at most once even when several patterns apply.
static TARGET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^Electronics",
        r"^Electronics > Audio",
        r"^Electronics > Cameras",
        r"^Electronics > Communications",
        r"^Electronics > Computers",
        r"^Electronics > Gaming",
        r"^Electronics > Home Audio",
        r"^Electronics > Mobile Phones",
        r"^Electronics > Tablets",
        r"^Electronics > Video",
        r"^Electronics > Wearables",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("target pattern"))
    .collect()
});

/// Popular categories appended when the filter yields too few matches.
pub static FALLBACK_CATEGORIES: &[&str] = &[
    "Electronics > Audio > Headphones",
    "Electronics > Audio > Speakers",
    "Electronics > Cameras > Digital Cameras",
    "Electronics > Communications > Telephony > Mobile Phone Accessories",
    "Electronics > Communications > Telephony > Mobile Phones",
    "Electronics > Computers > Desktop Computers",
    "Electronics > Computers > Laptops",
    "Electronics > Computers > Tablets",
    "Electronics > Gaming > Video Game Consoles",
    "Electronics > Home Audio > Home Theater Systems",
    "Electronics > Mobile Phones > Smartphones",
    "Electronics > Video > Televisions",
    "Electronics > Wearables > Smartwatches",
    "Electronics > Wearables > Fitness Trackers",
];

/// Filter raw taxonomy text down to the matching category lines.
///
/// Splits on newline, trims each line, skips blanks and `#` comments, and
/// keeps lines matching any target pattern. Output preserves file order.
pub fn filter_categories(body: &str) -> Vec<String> {
    let mut categories = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if TARGET_PATTERNS.iter().any(|p| p.is_match(line)) {
            categories.push(line.to_string());
        }
    }

    debug!(matched = categories.len(), "taxonomy lines filtered");
    categories
}

/// Pad the filtered list with fallback categories when it is too short.
///
/// With `min_categories` or more entries the list passes through untouched
/// and the fallback list is not consulted. Otherwise each fallback entry not
/// already present (exact string equality, no normalization) is appended in
/// fallback order. Returns the list and whether padding happened.
pub fn apply_fallbacks(
    mut categories: Vec<String>,
    min_categories: usize,
) -> (Vec<String>, bool) {
    if categories.len() >= min_categories {
        return (categories, false);
    }

    for fallback in FALLBACK_CATEGORIES {
        if !categories.iter().any(|c| c == fallback) {
            categories.push((*fallback).to_string());
        }
    }

    debug!(total = categories.len(), "fallback categories applied");
    (categories, true)
}

/// Sort the combined list in byte order and truncate to `max_categories`.
pub fn finalize_subset(mut categories: Vec<String>, max_categories: usize) -> Vec<String> {
    categories.sort_unstable();
    categories.truncate(max_categories);
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: usize = 15;
    const MAX: usize = 20;

    #[test]
    fn filter_keeps_matching_lines_in_file_order() {
        let body = "Electronics > Video\nApparel > Shoes\nElectronics > Audio\n";
        let filtered = filter_categories(body);
        assert_eq!(filtered, vec!["Electronics > Video", "Electronics > Audio"]);
    }

    #[test]
    fn filter_skips_comments_and_blanks() {
        let body = "# Google_Product_Taxonomy_Version: 2021-09-21\n\n  \nElectronics\n# Electronics > Audio\n";
        let filtered = filter_categories(body);
        assert_eq!(filtered, vec!["Electronics"]);
    }

    #[test]
    fn filter_trims_surrounding_whitespace() {
        let body = "  Electronics > Gaming  \n";
        let filtered = filter_categories(body);
        assert_eq!(filtered, vec!["Electronics > Gaming"]);
    }

    #[test]
    fn filter_adds_line_once_despite_multiple_matching_patterns() {
        // Matches both the bare prefix and the Audio branch pattern.
        let body = "Electronics > Audio > Headphones\n";
        let filtered = filter_categories(body);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn filter_rejects_non_prefix_occurrences() {
        // The patterns are anchored; a mention elsewhere in the line is not a match.
        let body = "Apparel > Electronics Cases\n";
        assert!(filter_categories(body).is_empty());
    }

    #[test]
    fn fallbacks_skipped_when_enough_matches() {
        let categories: Vec<String> = (0..MIN)
            .map(|i| format!("Electronics > Branch {i:02}"))
            .collect();
        let (padded, did_pad) = apply_fallbacks(categories.clone(), MIN);
        assert!(!did_pad);
        assert_eq!(padded, categories);
    }

    #[test]
    fn fallbacks_appended_when_too_few_matches() {
        let categories = vec![
            "Electronics > Audio".to_string(),
            "Electronics > Audio > Headphones".to_string(),
        ];
        let (padded, did_pad) = apply_fallbacks(categories, MIN);
        assert!(did_pad);
        // One fallback was already present, so 13 of 14 are appended.
        assert_eq!(padded.len(), 2 + FALLBACK_CATEGORIES.len() - 1);
        for fallback in FALLBACK_CATEGORIES {
            assert_eq!(padded.iter().filter(|c| c == fallback).count(), 1);
        }
    }

    #[test]
    fn fallback_presence_check_is_exact_match() {
        // A longer path is not "already present" for its prefix, and vice versa.
        let categories = vec!["Electronics > Audio".to_string()];
        let (padded, _) = apply_fallbacks(categories, MIN);
        assert!(padded.iter().any(|c| c == "Electronics > Audio > Headphones"));
        assert_eq!(padded.len(), 1 + FALLBACK_CATEGORIES.len());
    }

    #[test]
    fn finalize_sorts_and_truncates() {
        let categories: Vec<String> = (0..25)
            .rev()
            .map(|i| format!("Electronics > Branch {i:02}"))
            .collect();
        let finalized = finalize_subset(categories, MAX);
        assert_eq!(finalized.len(), MAX);
        assert!(finalized.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(finalized[0], "Electronics > Branch 00");
    }

    #[test]
    fn finalize_uses_byte_order() {
        let categories = vec![
            "electronics > audio".to_string(),
            "Electronics > Video".to_string(),
        ];
        let finalized = finalize_subset(categories, MAX);
        // Uppercase sorts before lowercase in byte order.
        assert_eq!(finalized[0], "Electronics > Video");
    }

    #[test]
    fn two_matches_then_full_fallback_padding() {
        let body = "Electronics > Audio\nElectronics > Audio > Headphones\nRandomCategory\n# comment\n";
        let filtered = filter_categories(body);
        assert_eq!(
            filtered,
            vec!["Electronics > Audio", "Electronics > Audio > Headphones"]
        );

        let (combined, did_pad) = apply_fallbacks(filtered, MIN);
        assert!(did_pad);
        // "Electronics > Audio > Headphones" exact-matches a fallback entry,
        // so only 13 of the 14 fallbacks are new.
        assert_eq!(combined.len(), 2 + FALLBACK_CATEGORIES.len() - 1);

        let finalized = finalize_subset(combined, MAX);
        assert!(finalized.len() <= MAX);
        assert!(finalized.windows(2).all(|w| w[0] <= w[1]));
    }
}
