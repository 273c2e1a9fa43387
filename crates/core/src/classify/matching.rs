/// Terms this short are matched on letter boundaries so that `cap` does not
/// fire inside `capture`.
const SHORT_TERM_MAX_LEN: usize = 4;

/// Case-sensitive containment test used for keywords and brand tokens. Callers
/// pass lowercased text and lowercased terms.
pub fn contains_term(text_lower: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if is_short_alphabetic(term) {
        return contains_bounded(text_lower, term);
    }
    text_lower.contains(term)
}

fn is_short_alphabetic(term: &str) -> bool {
    term.len() <= SHORT_TERM_MAX_LEN && term.bytes().all(|byte| byte.is_ascii_alphabetic())
}

fn contains_bounded(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(|ch| ch.is_ascii_lowercase())
            && !after.is_some_and(|ch| ch.is_ascii_lowercase())
    })
}

/// Number of `words` that occur anywhere in `text_lower`.
pub fn count_present<'a>(text_lower: &str, words: impl IntoIterator<Item = &'a String>) -> usize {
    words.into_iter().filter(|word| text_lower.contains(word.as_str())).count()
}
