//! Fuzzy drug lookup by name.

use serde::Serialize;
use strsim::{jaro_winkler, normalized_levenshtein};

use super::Catalog;

/// Minimum similarity to be returned as a match.
const MIN_SCORE: f64 = 0.55;

/// Score given to a name that starts with the query.
const PREFIX_SCORE: f64 = 0.95;

/// A catalog entry matched against a query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DrugMatch {
    /// Position in the catalog
    pub index: usize,
    pub name: String,
    /// Similarity (0.0 - 1.0)
    pub score: f64,
}

impl Catalog {
    /// Rank drugs by similarity to `query`, best first.
    pub fn find(&self, query: &str, limit: usize) -> Vec<DrugMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<DrugMatch> = self
            .iter()
            .enumerate()
            .map(|(index, drug)| DrugMatch {
                index,
                name: drug.name.clone(),
                score: name_score(&drug.name.to_lowercase(), &query),
            })
            .filter(|m| m.score >= MIN_SCORE)
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        matches.truncate(limit);
        matches
    }

    /// Resolve a selector to a catalog index.
    ///
    /// A number selects by position; anything else is the best name match.
    pub fn lookup(&self, selector: &str) -> Option<usize> {
        if let Ok(index) = selector.trim().parse::<usize>() {
            return (index < self.len()).then_some(index);
        }
        self.find(selector, 1).first().map(|m| m.index)
    }
}

fn name_score(name: &str, query: &str) -> f64 {
    if name == query {
        return 1.0;
    }
    if name.starts_with(query) {
        return PREFIX_SCORE;
    }
    jaro_winkler(name, query) * 0.6 + normalized_levenshtein(name, query) * 0.4
}
