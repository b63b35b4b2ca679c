//! Word-overlap similarity test used to avoid repeating near-identical
//! replies within a short conversational window.

use std::collections::HashSet;

/// Overlap ratio above which two replies count as "the same thing said twice".
const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Jaccard-style overlap on case-folded whitespace-split word sets.
///
/// Returns `false` when either string has no words at all, so an empty
/// candidate never blocks selection.
pub fn responses_too_similar(a: &str, b: &str) -> bool {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let words_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let words_b: HashSet<&str> = b_lower.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64 > SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_similar() {
        assert!(responses_too_similar("that is fascinating", "that is fascinating"));
        assert!(responses_too_similar("VR headsets are great", "vr headsets are great"));
    }

    #[test]
    fn empty_string_is_never_similar() {
        assert!(!responses_too_similar("", "anything at all"));
        assert!(!responses_too_similar("anything at all", ""));
        assert!(!responses_too_similar("", ""));
        assert!(!responses_too_similar("   ", "words here"));
    }

    #[test]
    fn disjoint_strings_are_not_similar() {
        assert!(!responses_too_similar(
            "cats chase mice around barns",
            "quantum computing uses qubits"
        ));
    }

    #[test]
    fn small_overlap_is_not_similar() {
        // 2 shared words out of 9 distinct.
        assert!(!responses_too_similar(
            "the weather is lovely today",
            "the ocean is deep and cold"
        ));
    }

    #[test]
    fn near_duplicates_are_similar() {
        // One word swapped out of six, overlap 5/7.
        assert!(responses_too_similar(
            "I find music quite interesting today",
            "I find anime quite interesting today"
        ));
    }
}
