//! String and token-sequence matching helpers for command resolution.

/// Whether `prefix` matches the beginning of `values`, element by element.
///
/// Comparison is plain value equality, so `values` may hold any type
/// comparable against the prefix elements (message tokens against command
/// labels, for example).
///
/// # Panics
///
/// Panics if `prefix` is longer than `values`. Callers must uphold
/// `prefix.len() <= values.len()`.
#[must_use]
pub fn sequence_prefix_matches<P, V>(prefix: &[P], values: &[V]) -> bool
where
    V: PartialEq<P>,
{
    for (i, part) in prefix.iter().enumerate() {
        if values[i] != *part {
            return false;
        }
    }
    true
}

/// Whether `a` and `b` share a case-insensitive element at the same index.
///
/// Despite the "intersects" reading, this is positional rather than
/// setwise: index `i` of `a` is only ever compared with index `i` of `b`,
/// so `["a", "b"]` and `["b", "a"]` do not intersect. Duplicate-name checks
/// built on top of this inherit that behavior. Case folding is ASCII-only.
#[must_use]
pub fn intersects_ignoring_case<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    a.iter()
        .zip(b.iter())
        .any(|(left, right)| left.as_ref().eq_ignore_ascii_case(right.as_ref()))
}

/// Similarity score in `[0, 1]` between `source` and `target`.
///
/// Scans `source` left to right while a cursor advances over `target` on
/// every character hit; the advance count is then normalized against the
/// two lengths. This is a homegrown heuristic tuned for short display
/// names, not an edit distance: swapping the arguments can change the
/// score, and transposed characters are punished harder than a Levenshtein
/// ratio would punish them.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fuzzy_similarity(source: &str, target: &str) -> f64 {
    if source == target {
        return 1.0;
    }

    let source_chars: Vec<char> = source.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut matched = 0usize;
    for i in 0..source_chars.len().max(target_chars.len()) {
        // Cursor past the end of `target` means nothing further can match.
        let Some(expected) = target_chars.get(matched) else {
            break;
        };
        if source_chars.get(i) == Some(expected) {
            matched += 1;
        }
    }

    let longer = source_chars.len().max(target_chars.len());
    let shorter = source_chars.len().min(target_chars.len());

    matched as f64 / (longer + (shorter - matched)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn prefix_matches_start_of_longer_sequence() {
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(sequence_prefix_matches(&["a", "b"], &values));
    }

    #[test]
    fn prefix_mismatch_returns_false() {
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(!sequence_prefix_matches(&["a", "z"], &values));
    }

    #[test]
    fn full_length_prefix_matches() {
        let values = vec!["perm".to_string(), "add".to_string()];
        assert!(sequence_prefix_matches(&["perm", "add"], &values));
    }

    #[test]
    fn empty_prefix_matches_anything() {
        let values = vec!["a".to_string()];
        let prefix: [&str; 0] = [];
        assert!(sequence_prefix_matches(&prefix, &values));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn prefix_longer_than_values_panics() {
        let values = vec!["a".to_string(), "b".to_string()];
        let _ = sequence_prefix_matches(&["a", "b", "c"], &values);
    }

    #[test]
    fn intersects_on_case_insensitive_positional_match() {
        assert!(intersects_ignoring_case(&["A", "b"], &["a", "X"]));
    }

    #[test]
    fn no_positional_match_means_no_intersection() {
        assert!(!intersects_ignoring_case(&["A", "b"], &["X", "Y"]));
    }

    #[test]
    fn intersection_is_positional_not_setwise() {
        // Both elements occur in both slices, just never at the same index.
        assert!(!intersects_ignoring_case(&["a", "b"], &["b", "a"]));
    }

    #[test]
    fn elements_beyond_the_shorter_slice_are_ignored() {
        assert!(intersects_ignoring_case(&["x"], &["X", "y", "z"]));
        assert!(!intersects_ignoring_case(&["q"], &["X", "y", "z"]));
    }

    #[test]
    fn empty_slices_never_intersect() {
        let empty: [&str; 0] = [];
        assert!(!intersects_ignoring_case(&empty, &["a"]));
        assert!(!intersects_ignoring_case(&empty, &empty));
    }

    #[test]
    fn identical_strings_score_one() {
        assert!(close(fuzzy_similarity("abc", "abc"), 1.0));
        assert!(close(fuzzy_similarity("小明", "小明"), 1.0));
        assert!(close(fuzzy_similarity("", ""), 1.0));
    }

    #[test]
    fn empty_operand_scores_are_defined() {
        assert!(close(fuzzy_similarity("abc", ""), 0.0));
        assert!(close(fuzzy_similarity("", "abc"), 0.0));
    }

    #[test]
    fn scores_match_hand_computed_values() {
        // matched / (longer + (shorter - matched)), worked out by hand.
        assert!(close(fuzzy_similarity("alice", "alic"), 0.8));
        assert!(close(fuzzy_similarity("alicia", "alic"), 2.0 / 3.0));
        assert!(close(fuzzy_similarity("alpaca", "alic"), 0.25));
        assert!(close(fuzzy_similarity("bob", "alice"), 0.0));
    }

    #[test]
    fn similarity_is_not_symmetric() {
        assert!(close(fuzzy_similarity("axb", "ab"), 2.0 / 3.0));
        assert!(close(fuzzy_similarity("ab", "axb"), 0.25));
    }

    #[test]
    fn diverges_from_normalized_levenshtein() {
        // Guards against "simplifying" the heuristic into the standard
        // ratio: the two disagree badly on even a one-letter insertion.
        let ours = fuzzy_similarity("ab", "axb");
        let levenshtein = strsim::normalized_levenshtein("ab", "axb");
        assert!((ours - levenshtein).abs() > 0.1);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        for (source, target) in [
            ("alice", "alic"),
            ("alic", "alice"),
            ("", "x"),
            ("longer name card", "short"),
            ("张三", "张三丰"),
        ] {
            let score = fuzzy_similarity(source, target);
            assert!((0.0..=1.0).contains(&score), "{source:?} vs {target:?} gave {score}");
        }
    }
}
