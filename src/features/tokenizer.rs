use crate::constants::MAX_NGRAM;

/// Lowercases `text` and splits it into word tokens.
///
/// A token is a maximal run of alphanumeric or `_` characters at least two
/// characters long. Everything else is a separator.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|tok| tok.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Unigrams followed by bigrams (consecutive pairs joined by one space).
pub fn ngrams(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::with_capacity(tokens.len() * MAX_NGRAM);

    for n in 1..=MAX_NGRAM {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }

    terms
}
