use serde::{Deserialize, Serialize};

use crate::item::CatalogItem;
use crate::similarity::tokenizer::tokenize;
use crate::similarity::vector::build_vector;

/// Default similarity floor for emitting a relationship.
pub const RELATIONSHIP_THRESHOLD: f64 = 0.7;

/// A similarity edge between two catalog items, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRelationship {
    pub item_id: String,
    pub related_item_id: String,
    pub similarity_score: f64,
}

/// Cosine similarity of two items over a corpus of just the pair.
///
/// Idf here is local to the two documents being compared, not to the whole
/// catalog — a different statistic from the ranker's per-document corpora.
/// The two paths are kept separate on purpose; unifying them would shift
/// ranking behavior.
pub fn pair_similarity(a: &CatalogItem, b: &CatalogItem) -> f64 {
    let tokens_a = tokenize(&a.search_text());
    let tokens_b = tokenize(&b.search_text());
    let corpus: [&[String]; 2] = [&tokens_a, &tokens_b];

    let vector_a = build_vector(&tokens_a, &corpus);
    let vector_b = build_vector(&tokens_b, &corpus);
    vector_a.cosine_similarity(&vector_b)
}

/// Compare an anchor item against candidates and emit the pairs at or above
/// `threshold`. Self-pairs are skipped.
///
/// Only anchor→candidate edges are produced; one pass over newly created
/// items therefore never emits both (A,B) and (B,A). Deduplication across
/// separate calls is the persistence layer's concern, since the engine has
/// no view of what is already stored.
pub fn build_relationships(
    anchor: &CatalogItem,
    candidates: &[CatalogItem],
    threshold: f64,
) -> Vec<HistoryRelationship> {
    candidates
        .iter()
        .filter(|candidate| candidate.id != anchor.id)
        .filter_map(|candidate| {
            let score = pair_similarity(anchor, candidate);
            (score >= threshold).then(|| HistoryRelationship {
                item_id: anchor.id.clone(),
                related_item_id: candidate.id.clone(),
                similarity_score: score,
            })
        })
        .collect()
}
