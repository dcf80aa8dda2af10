//! Core domain types for the taxonomy subset output.

use serde::{Deserialize, Serialize};

/// The record written to `taxonomy-subset.json`.
///
/// Field order is part of the output contract: `source`, `count`,
/// `categories`, `description`, `lastUpdated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySubset {
    /// URL the taxonomy was fetched from.
    pub source: String,
    /// Number of categories in the subset. Always equals `categories.len()`.
    pub count: usize,
    /// The curated category paths, sorted in byte order.
    pub categories: Vec<String>,
    /// Human-readable description of the subset.
    pub description: String,
    /// Static date the subset definition was last revised. Not derived from
    /// run time, so repeated runs over identical input are byte-identical.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl TaxonomySubset {
    /// Build a subset record from an already sorted and truncated category
    /// list. `count` is derived from the list length.
    pub fn new(
        source: impl Into<String>,
        categories: Vec<String>,
        description: impl Into<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            count: categories.len(),
            categories,
            description: description.into(),
            last_updated: last_updated.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_tracks_category_length() {
        let subset = TaxonomySubset::new(
            "https://example.com/taxonomy.txt",
            vec!["Electronics".into(), "Electronics > Audio".into()],
            "test subset",
            "2024-01-15",
        );
        assert_eq!(subset.count, 2);
        assert_eq!(subset.count, subset.categories.len());
    }

    #[test]
    fn serializes_with_camel_case_last_updated() {
        let subset = TaxonomySubset::new(
            "https://example.com/taxonomy.txt",
            vec!["Electronics".into()],
            "test subset",
            "2024-01-15",
        );
        let json = serde_json::to_string_pretty(&subset).expect("serialize");
        assert!(json.contains("\"lastUpdated\": \"2024-01-15\""));
        assert!(!json.contains("last_updated"));
    }

    #[test]
    fn field_order_is_stable() {
        let subset = TaxonomySubset::new(
            "https://example.com/taxonomy.txt",
            vec!["Electronics".into()],
            "test subset",
            "2024-01-15",
        );
        let json = serde_json::to_string(&subset).expect("serialize");
        let source_pos = json.find("\"source\"").unwrap();
        let count_pos = json.find("\"count\"").unwrap();
        let categories_pos = json.find("\"categories\"").unwrap();
        let description_pos = json.find("\"description\"").unwrap();
        let updated_pos = json.find("\"lastUpdated\"").unwrap();
        assert!(source_pos < count_pos);
        assert!(count_pos < categories_pos);
        assert!(categories_pos < description_pos);
        assert!(description_pos < updated_pos);
    }

    #[test]
    fn roundtrip() {
        let subset = TaxonomySubset::new(
            "https://example.com/taxonomy.txt",
            vec!["Electronics > Video > Televisions".into()],
            "test subset",
            "2024-01-15",
        );
        let json = serde_json::to_string(&subset).expect("serialize");
        let parsed: TaxonomySubset = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, subset);
    }
}
