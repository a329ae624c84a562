use proptest::prelude::*;

use crate::search::scoring::{classify, find_highlights, levenshtein, score, MatchTier};

// Property test: every score stays inside 0..=100
proptest! {
    #[test]
    fn score_is_bounded(query in "\\PC{0,24}", text in "\\PC{0,48}") {
        let s = score(&query, &text);
        prop_assert!(s <= 100);
    }
}

// Property test: a non-blank query always matches itself exactly
proptest! {
    #[test]
    fn self_match_is_exact(query in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}") {
        prop_assert_eq!(score(&query, &query), 100);
    }
}

// Property test: word-overlap and fuzzy tiers never exceed their caps
proptest! {
    #[test]
    fn lower_tiers_are_capped(query in "[a-z ]{1,16}", text in "[a-z ]{1,32}") {
        let result = classify(&query, &text);
        match result.tier {
            MatchTier::WordOverlap => prop_assert!(result.score <= 50),
            MatchTier::Fuzzy => prop_assert!(result.score <= 30),
            MatchTier::Empty => prop_assert_eq!(result.score, 0),
            _ => prop_assert!(result.score >= 70),
        }
    }
}

// Property test: highlight spans are ordered, disjoint and inside the text
proptest! {
    #[test]
    fn highlights_are_disjoint(query in "[a-c]{1,3}", text in "[a-c ]{0,40}") {
        let spans = find_highlights(&query, &text);
        let len = text.chars().count();
        let mut last_end = 0;
        for (start, end) in spans {
            prop_assert!(start >= last_end);
            prop_assert!(start < end);
            prop_assert!(end <= len);
            last_end = end;
        }
    }
}

// Property test: spans stay inside arbitrary unicode text
proptest! {
    #[test]
    fn highlights_stay_in_bounds(query in "\\PC{1,3}", text in "\\PC{0,30}") {
        let len = text.chars().count();
        let mut last_end = 0;
        for (start, end) in find_highlights(&query, &text) {
            prop_assert!(start >= last_end);
            prop_assert!(start < end);
            prop_assert!(end <= len);
            last_end = end;
        }
    }
}

// Property test: edit distance is symmetric and bounded by the longer input
proptest! {
    #[test]
    fn levenshtein_symmetric(a in "[a-e]{0,12}", b in "[a-e]{0,12}") {
        let d = levenshtein(&a, &b);
        prop_assert_eq!(d, levenshtein(&b, &a));
        prop_assert!(d <= a.len().max(b.len()));
    }
}
