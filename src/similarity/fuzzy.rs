use ahash::AHashSet;

use crate::item::CatalogItem;
use crate::similarity::tokenizer::tokenize;

/// Knobs for fuzzy matching.
#[derive(Debug, Clone)]
pub struct FuzzyOptions {
    /// Inclusive lower bound: items scoring at least this are kept. Note
    /// the asymmetry with the ranker, whose cutoff is exclusive.
    pub threshold: f64,
    pub limit: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            limit: 20,
        }
    }
}

/// Jaccard similarity over unique tokens: |A ∩ B| / |A ∪ B|.
///
/// `0.0` when the union is empty.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: AHashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: AHashSet<&str> = b.iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Cheap token-overlap search, the fallback when the cosine path is
/// overkill. Scores are used for ordering only and not exposed.
pub fn fuzzy_match(query: &str, catalog: &[CatalogItem], options: &FuzzyOptions) -> Vec<CatalogItem> {
    let query_tokens = tokenize(query);

    let mut matches: Vec<(&CatalogItem, f64)> = catalog
        .iter()
        .filter_map(|item| {
            let item_tokens = tokenize(&item.search_text());
            let score = jaccard_similarity(&query_tokens, &item_tokens);
            (score >= options.threshold).then_some((item, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.total_cmp(&a.1));
    matches.truncate(options.limit);
    matches.into_iter().map(|(item, _)| item.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn jaccard_of_identical_non_empty_sets_is_one() {
        let tokens = doc(&["seringa", "descartável"]);
        assert_eq!(jaccard_similarity(&tokens, &tokens), 1.0);
    }

    #[test]
    fn jaccard_of_empty_sets_is_zero() {
        assert_eq!(jaccard_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded() {
        let a = doc(&["luva", "nitrilo", "caixa"]);
        let b = doc(&["luva", "latex"]);
        let ab = jaccard_similarity(&a, &b);
        let ba = jaccard_similarity(&b, &a);
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
        // one shared token out of four distinct
        assert!((ab - 0.25).abs() < 1e-12);
    }

    #[test]
    fn duplicate_tokens_do_not_change_the_score() {
        let a = doc(&["gaze", "gaze", "esteril"]);
        let b = doc(&["gaze", "esteril"]);
        assert_eq!(jaccard_similarity(&a, &b), 1.0);
    }

    #[test]
    fn fuzzy_match_keeps_threshold_hits_in_score_order() {
        let catalog = vec![
            CatalogItem::new("1", "OR1", "seringa descartável 10ml", None),
            CatalogItem::new("2", "X9", "cadeira giratória", None),
            CatalogItem::new("3", "6B", "seringa descartável", None),
        ];

        let matches = fuzzy_match("seringa descartável", &catalog, &FuzzyOptions::default());
        // item 3 shares every token with the query, item 1 carries extras,
        // item 2 shares nothing
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].code, "6B");
        assert_eq!(matches[1].code, "OR1");
    }

    #[test]
    fn threshold_is_inclusive() {
        let catalog = vec![CatalogItem::new("1", "AB1", "luva nitrilo", None)];
        // query ∩ item = {luva}, union = {luva, nitrilo, ab1... }
        let options = FuzzyOptions {
            threshold: 1.0,
            ..FuzzyOptions::default()
        };
        let matches = fuzzy_match("ab1 luva nitrilo", &catalog, &options);
        assert_eq!(matches.len(), 1);
    }
}
