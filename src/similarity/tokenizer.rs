use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Bilingual (Portuguese + English) stop-word table.
///
/// Articles, prepositions, conjunctions and a handful of common verbs that
/// carry no weight in a catalog description. Static configuration; never
/// mutated at runtime.
static STOP_WORDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
        "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
        "to", "was", "will", "with", "para", "com", "por", "em", "de",
        "da", "do", "das", "dos", "na", "no", "nas", "nos", "um", "uma",
        "uns", "umas", "ou", "mas", "que", "como", "ser", "ter", "estar",
    ]
    .into_iter()
    .collect()
});

/// Split free text into normalized index terms.
///
/// Lower-cases the input, replaces everything except word characters and
/// accented Latin letters with spaces, then splits on whitespace. Tokens of
/// two characters or fewer and stop-words are dropped. Never fails; empty
/// or pure-punctuation input yields an empty list.
///
/// Tokenizing the re-joined output of a previous call yields the same
/// tokens again: every emitted token already survives the length and
/// stop-word filters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if is_index_char(c) { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !STOP_WORDS.contains(*token))
        .map(str::to_owned)
        .collect()
}

/// Word characters plus the Latin-1 accented range; the catalog corpus is
/// Portuguese and diacritics are significant.
fn is_index_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{00C0}'..='\u{00FF}').contains(&c)
}
