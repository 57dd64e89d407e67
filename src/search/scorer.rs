//! Tiered text similarity scoring.
//!
//! [`score`] rates how well a query matches one candidate string. The policy is
//! a fixed ladder evaluated top to bottom, first match wins:
//!
//! | Tier | Condition (case-insensitive)                          | Score |
//! |------|-------------------------------------------------------|-------|
//! | 1    | candidate equals query                                | 100   |
//! | 2    | candidate starts with query                           | 90    |
//! | 3    | query occurs with a space directly before or after it | 70    |
//! | 4    | query occurs anywhere                                 | 50    |
//! | 5    | query characters occur in order (subsequence)         | 30    |
//! | 6    | otherwise                                             | 0     |
//!
//! [`effective_score`] combines a name score with a description score the way
//! the catalog providers rank their records. The mini-app provider does not use
//! either function; it has its own policy in
//! [`providers::miniapp`](crate::providers::miniapp).

pub const EXACT: u8 = 100;
pub const PREFIX: u8 = 90;
pub const WORD: u8 = 70;
pub const SUBSTRING: u8 = 50;
pub const SUBSEQUENCE: u8 = 30;
pub const NO_MATCH: u8 = 0;

/// Name scores below this also consult the description.
const DESCRIPTION_THRESHOLD: u8 = SUBSTRING;

/// Scores `candidate` against `query` in `0..=100`.
///
/// Total and deterministic: any pair of strings yields a score, and changing
/// the case of either argument never changes it.
///
/// # Example
///
/// ```rust
/// use spotlite::search::score;
///
/// assert_eq!(score("abc", "ABC"), 100);
/// assert_eq!(score("ab", "abcdef"), 90);
/// assert_eq!(score("cd", "ab cd ef"), 70);
/// assert_eq!(score("cd", "abcdef"), 50);
/// assert_eq!(score("ace", "abcdef"), 30);
/// assert_eq!(score("xyz", "abcdef"), 0);
/// ```
#[must_use]
pub fn score(query: &str, candidate: &str) -> u8 {
    let query = query.to_lowercase();
    let candidate = candidate.to_lowercase();

    if candidate == query {
        return EXACT;
    }

    if candidate.starts_with(&query) {
        return PREFIX;
    }

    if is_word_delimited(&candidate, &query) {
        return WORD;
    }

    if candidate.contains(&query) {
        return SUBSTRING;
    }

    if is_subsequence(&candidate, &query) {
        return SUBSEQUENCE;
    }

    NO_MATCH
}

/// Ranks a record by its name, falling back to a half-weight description match.
///
/// A strong name match (score 50 or more) is taken as is and the description is
/// never scored. Otherwise the better of the name score and half the description
/// score wins. A result of 0 means the record does not match at all.
#[must_use]
pub fn effective_score(query: &str, name: &str, description: &str) -> u8 {
    let name_score = score(query, name);
    if name_score >= DESCRIPTION_THRESHOLD {
        return name_score;
    }

    let description_score = score(query, description);
    name_score.max(description_score / 2)
}

/// True when `needle` occurs in `haystack` with a space on at least one side.
fn is_word_delimited(haystack: &str, needle: &str) -> bool {
    haystack.contains(&format!(" {needle}")) || haystack.contains(&format!("{needle} "))
}

/// True when every character of `needle` appears in `haystack` in order.
fn is_subsequence(haystack: &str, needle: &str) -> bool {
    let mut remaining = needle.chars().peekable();
    for c in haystack.chars() {
        match remaining.peek() {
            Some(&wanted) if wanted == c => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_match_reference_pairs() {
        assert_eq!(score("abc", "abc"), 100);
        assert_eq!(score("ab", "abcdef"), 90);
        assert_eq!(score("cd", "ab cd ef"), 70);
        assert_eq!(score("cd", "abcdef"), 50);
        assert_eq!(score("ace", "abcdef"), 30);
        assert_eq!(score("xyz", "abcdef"), 0);
    }

    #[test]
    fn word_tier_accepts_single_sided_delimiters() {
        assert_eq!(score("cd", "ab cdef"), 70);
        assert_eq!(score("cd", "abcd ef"), 70);
        assert_eq!(score("cd", "ab cd"), 70);
    }

    #[test]
    fn case_never_changes_the_score() {
        let pairs = [
            ("Fire", "firefox"),
            ("WEB", "Web Browser"),
            ("tErM", "GNOME Terminal"),
            ("ace", "ABCDEF"),
            ("zzz", "Files"),
        ];
        for (query, text) in pairs {
            let expected = score(query, text);
            assert_eq!(score(&query.to_lowercase(), &text.to_uppercase()), expected);
            assert_eq!(score(&query.to_uppercase(), &text.to_lowercase()), expected);
        }
    }

    #[test]
    fn scores_stay_in_bounds_for_odd_inputs() {
        let inputs = ["", " ", "a", "ß", "日本語", "a b c", "%u"];
        for query in inputs {
            for text in inputs {
                assert!(score(query, text) <= 100);
            }
        }
    }

    #[test]
    fn empty_query_is_a_prefix_of_everything() {
        assert_eq!(score("", ""), 100);
        assert_eq!(score("", "Firefox"), 90);
    }

    #[test]
    fn subsequence_requires_order() {
        assert_eq!(score("fa", "abcdef"), 0);
        assert_eq!(score("af", "abcdef"), 30);
    }

    #[test]
    fn strong_name_match_ignores_description() {
        assert_eq!(effective_score("fi", "Firefox", "fi"), 90);
    }

    #[test]
    fn weak_name_match_takes_half_description_score() {
        // name is a subsequence (30); description is a prefix (90 / 2 = 45)
        assert_eq!(effective_score("web", "Wide Epic Browser", "Web browser"), 45);
        // name misses entirely; description word match 70 / 2 = 35
        assert_eq!(effective_score("browser", "Firefox", "Web browser"), 35);
    }

    #[test]
    fn no_match_anywhere_is_zero() {
        assert_eq!(effective_score("xyz", "Firefox", "Web browser"), 0);
    }
}
