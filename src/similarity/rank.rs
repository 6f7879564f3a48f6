use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::item::{CatalogItem, SampleUsage};
use crate::similarity::tokenizer::tokenize;
use crate::similarity::vector::build_vector;

/// Knobs for ranked similarity search.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Exclusive lower bound: items scoring at or below this are dropped.
    pub min_similarity: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            min_similarity: 0.1,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarItem {
    pub item: CatalogItem,
    /// Cosine similarity rounded to two decimals; downstream screens show
    /// it as a percentage.
    pub similarity: f64,
    /// Always empty when it leaves the engine; the caller augments it from
    /// persisted sample usage.
    pub sample_history: Vec<SampleUsage>,
}

/// Rank a catalog against a free-text query.
///
/// Each item is indexed as its `search_text()`; query and item vectors are
/// each built against their own single-document corpus, so idf acts as a
/// constant factor and the comparison reduces to term-frequency cosine.
/// Results are sorted by descending similarity (ties keep catalog order),
/// cut at `limit`, and rounded to two decimals.
pub fn rank(query: &str, catalog: &[CatalogItem], options: &RankOptions) -> Vec<SimilarItem> {
    let query_tokens = tokenize(query);
    let query_vector = build_vector(&query_tokens, &[&query_tokens]);

    let mut scored: Vec<(&CatalogItem, f64)> = catalog
        .par_iter()
        .map(|item| {
            let item_tokens = tokenize(&item.search_text());
            let item_vector = build_vector(&item_tokens, &[&item_tokens]);
            (item, query_vector.cosine_similarity(&item_vector))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .filter(|&(_, similarity)| similarity > options.min_similarity)
        .collect();

    // stable sort keeps catalog order on equal scores
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(options.limit);

    scored
        .into_iter()
        .map(|(item, similarity)| SimilarItem {
            item: item.clone(),
            similarity: round2(similarity),
            sample_history: Vec::new(),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
