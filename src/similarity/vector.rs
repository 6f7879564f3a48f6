use indexmap::IndexMap;

/// Sparse term-weight vector produced by [`build_vector`].
///
/// Keys are unique tokens, values are `tf * idf` weights. A token that is
/// absent from the underlying document has weight `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfIdfVector {
    weights: IndexMap<String, f64>,
}

impl TfIdfVector {
    /// Weight of a single token; `0.0` when the token is not present.
    pub fn weight(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    /// Number of distinct tokens carrying a weight.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(token, &weight)| (token.as_str(), weight))
    }

    /// Cosine similarity against another vector.
    ///
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// Returns `0.0` when either magnitude is zero, which covers the empty
    /// vector on both sides.
    pub fn cosine_similarity(&self, other: &TfIdfVector) -> f64 {
        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;

        for (token, weight_a) in self.iter() {
            norm_a += weight_a * weight_a;
            dot += weight_a * other.weight(token);
        }
        for (_, weight_b) in other.iter() {
            norm_b += weight_b * weight_b;
        }

        let magnitude = norm_a.sqrt() * norm_b.sqrt();
        if magnitude == 0.0 {
            0.0
        } else {
            dot / magnitude
        }
    }
}

/// Build the TF-IDF vector of `doc` against a reference corpus.
///
/// * tf(t)  = count(t in doc) / |doc|
/// * idf(t) = ln(|corpus| / (df(t) + 1))
///
/// The `+ 1` keeps the division defined when a term appears in no corpus
/// document; the flip side is that idf goes negative for terms present in
/// every document of a small corpus. That is the behavior the ranking
/// paths were tuned against, so it is kept as-is rather than smoothed.
///
/// The corpus may be as small as `[doc]` itself; idf then degenerates into
/// a constant factor and cosine comparisons reduce to plain tf.
pub fn build_vector(doc: &[String], corpus: &[&[String]]) -> TfIdfVector {
    if doc.is_empty() {
        return TfIdfVector::default();
    }

    // term frequency, preserving first-occurrence order
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for token in doc {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let doc_len = doc.len() as f64;
    let corpus_len = corpus.len() as f64;
    let weights = counts
        .iter()
        .map(|(&token, &count)| {
            let tf = count as f64 / doc_len;
            // document frequency: containment test per reference document
            let df = corpus
                .iter()
                .filter(|reference| reference.iter().any(|t| t.as_str() == token))
                .count() as f64;
            let idf = (corpus_len / (df + 1.0)).ln();
            (token.to_owned(), tf * idf)
        })
        .collect();

    TfIdfVector { weights }
}
