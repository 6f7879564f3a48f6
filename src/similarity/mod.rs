pub mod fuzzy;
pub mod rank;
pub mod relationship;
pub mod tokenizer;
pub mod vector;

use tracing::error;

use crate::error::RetrievalError;
use crate::item::CatalogItem;
use self::fuzzy::FuzzyOptions;
use self::rank::{RankOptions, SimilarItem};
use self::relationship::{HistoryRelationship, RELATIONSHIP_THRESHOLD};

/// Supplies the catalog snapshot the engine computes over.
///
/// The engine never caches, retries or times out: each search call asks the
/// source once and computes over exactly the snapshot it gets back.
pub trait CatalogSource {
    fn catalog_items(&self) -> Result<Vec<CatalogItem>, RetrievalError>;
}

/// The trivial in-memory source.
impl CatalogSource for Vec<CatalogItem> {
    fn catalog_items(&self) -> Result<Vec<CatalogItem>, RetrievalError> {
        Ok(self.clone())
    }
}

/// Front door for similarity search over a catalog source.
///
/// Holds the search knobs; all computation is per-call and side-effect
/// free. Every entry point comes in two flavors: `try_*` propagates a
/// retrieval failure, the plain variant logs it and returns an empty
/// result so a broken catalog store never fails the surrounding request.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    pub rank_options: RankOptions,
    pub fuzzy_options: FuzzyOptions,
    pub relationship_threshold: f64,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self {
            rank_options: RankOptions::default(),
            fuzzy_options: FuzzyOptions::default(),
            relationship_threshold: RELATIONSHIP_THRESHOLD,
        }
    }
}

impl SimilarityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked cosine search over the source's current snapshot.
    pub fn try_find_similar(
        &self,
        source: &impl CatalogSource,
        query: &str,
    ) -> Result<Vec<SimilarItem>, RetrievalError> {
        let catalog = source.catalog_items()?;
        Ok(rank::rank(query, &catalog, &self.rank_options))
    }

    /// Fail-soft ranked search: logs a retrieval failure and returns no
    /// matches.
    pub fn find_similar(&self, source: &impl CatalogSource, query: &str) -> Vec<SimilarItem> {
        match self.try_find_similar(source, query) {
            Ok(matches) => matches,
            Err(err) => {
                error!("similar-item search failed: {err}");
                Vec::new()
            }
        }
    }

    /// Token-overlap fuzzy search over the source's current snapshot.
    pub fn try_fuzzy_search(
        &self,
        source: &impl CatalogSource,
        query: &str,
    ) -> Result<Vec<CatalogItem>, RetrievalError> {
        let catalog = source.catalog_items()?;
        Ok(fuzzy::fuzzy_match(query, &catalog, &self.fuzzy_options))
    }

    /// Fail-soft fuzzy search.
    pub fn fuzzy_search(&self, source: &impl CatalogSource, query: &str) -> Vec<CatalogItem> {
        match self.try_fuzzy_search(source, query) {
            Ok(matches) => matches,
            Err(err) => {
                error!("fuzzy search failed: {err}");
                Vec::new()
            }
        }
    }

    /// Pairwise comparison of an anchor item against candidates, emitting
    /// the edges at or above the configured threshold.
    pub fn relate(
        &self,
        anchor: &CatalogItem,
        candidates: &[CatalogItem],
    ) -> Vec<HistoryRelationship> {
        relationship::build_relationships(anchor, candidates, self.relationship_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn catalog_items(&self) -> Result<Vec<CatalogItem>, RetrievalError> {
            Err(RetrievalError::new("catalog store offline"))
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "OR1", "seringa descartável 10ml", Some("Acme")),
            CatalogItem::new("2", "X9", "cadeira de escritório", None),
        ]
    }

    #[test]
    fn find_similar_goes_through_the_source() {
        let engine = SimilarityEngine::new();
        let results = engine.find_similar(&catalog(), "seringa descartável 10ml");
        assert_eq!(results[0].item.code, "OR1");
    }

    #[test]
    fn retrieval_failure_is_reported_by_try_variants() {
        let engine = SimilarityEngine::new();
        assert!(engine.try_find_similar(&FailingSource, "seringa").is_err());
        assert!(engine.try_fuzzy_search(&FailingSource, "seringa").is_err());
    }

    #[test]
    fn retrieval_failure_degrades_to_empty_results() {
        let engine = SimilarityEngine::new();
        assert!(engine.find_similar(&FailingSource, "seringa").is_empty());
        assert!(engine.fuzzy_search(&FailingSource, "seringa").is_empty());
    }

    #[test]
    fn relate_uses_the_configured_threshold() {
        let engine = SimilarityEngine::new();
        let anchor = CatalogItem::new("a", "OR1", "seringa descartável 10ml", None);
        let twin = CatalogItem::new("b", "OR1", "seringa descartável 10ml", None);

        let edges = engine.relate(&anchor, &[twin]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].related_item_id, "b");
    }
}
