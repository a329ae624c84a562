//! Relevance scoring
//!
//! Scores a query against one text field on a 0-100 scale using a tiered
//! policy. The first tier that fires decides the score:
//!
//! | tier | condition | score |
//! |------|-----------|-------|
//! | exact | normalized text == normalized query | 100 |
//! | prefix | text starts with query | 90 |
//! | substring | text contains query | 70 |
//! | word overlap | some query words overlap text words | `floor(50 * ratio)` |
//! | fuzzy | Levenshtein similarity of the full strings | `floor(30 * similarity)` |
//!
//! Highlight extraction is separate from scoring: it only reports literal
//! occurrences, so a fuzzy-tier hit has no spans.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::model::Highlight;

pub const EXACT_SCORE: u8 = 100;
pub const PREFIX_SCORE: u8 = 90;
pub const SUBSTRING_SCORE: u8 = 70;
pub const WORD_OVERLAP_MAX: f64 = 50.0;
pub const FUZZY_MAX: f64 = 30.0;

/// Which tier produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Prefix,
    Substring,
    WordOverlap,
    Fuzzy,
    /// Query or text was empty after normalization
    Empty,
}

/// Score together with the tier that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierScore {
    pub tier: MatchTier,
    pub score: u8,
}

/// NFC-compose, lowercase and trim
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase().trim().to_string()
}

/// Relevance of `query` to `text`, in `[0, 100]`
pub fn score(query: &str, text: &str) -> u8 {
    classify(query, text).score
}

/// Run the tiers in order and report the first one that fires
pub fn classify(query: &str, text: &str) -> TierScore {
    let query = normalize(query);
    let text = normalize(text);

    if query.is_empty() || text.is_empty() {
        return TierScore {
            tier: MatchTier::Empty,
            score: 0,
        };
    }

    if text == query {
        return TierScore {
            tier: MatchTier::Exact,
            score: EXACT_SCORE,
        };
    }

    if text.starts_with(&query) {
        return TierScore {
            tier: MatchTier::Prefix,
            score: PREFIX_SCORE,
        };
    }

    if text.contains(&query) {
        return TierScore {
            tier: MatchTier::Substring,
            score: SUBSTRING_SCORE,
        };
    }

    let ratio = word_overlap_ratio(&query, &text);
    if ratio > 0.0 {
        return TierScore {
            tier: MatchTier::WordOverlap,
            score: (WORD_OVERLAP_MAX * ratio).floor() as u8,
        };
    }

    let distance = levenshtein(&query, &text);
    let longest = query.chars().count().max(text.chars().count());
    let similarity = 1.0 - distance as f64 / longest as f64;
    TierScore {
        tier: MatchTier::Fuzzy,
        score: (FUZZY_MAX * similarity).floor() as u8,
    }
}

/// Fraction of query words that overlap some text word.
///
/// Two words overlap when either one contains the other.
fn word_overlap_ratio(query: &str, text: &str) -> f64 {
    let query_words: Vec<&str> = query.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }
    let text_words: Vec<&str> = text.split_whitespace().collect();

    let matched = query_words
        .iter()
        .filter(|qw| {
            text_words
                .iter()
                .any(|tw| tw.contains(**qw) || qw.contains(*tw))
        })
        .count();

    matched as f64 / query_words.len() as f64
}

/// Edit distance with unit cost for insertion, deletion and substitution.
///
/// Works over chars and keeps a single row of the DP table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // keep the shorter string as the row
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[short.len()]
}

/// Fold `text` the way `normalize` does, one combining sequence at a time.
///
/// Returns the folded string and, for every byte of it, the half-open char
/// range of the original sequence it came from. Not trimmed.
fn fold_with_origins(text: &str) -> (String, Vec<(usize, usize)>) {
    let chars: Vec<char> = text.chars().collect();
    let mut folded = String::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());

    let mut i = 0;
    while i < chars.len() {
        let mut j = i + 1;
        while j < chars.len() && canonical_combining_class(chars[j]) != 0 {
            j += 1;
        }
        let sequence: String = chars[i..j].iter().collect();
        let lowered = sequence.nfc().collect::<String>().to_lowercase();
        origins.extend(std::iter::repeat((i, j)).take(lowered.len()));
        folded.push_str(&lowered);
        i = j;
    }

    (folded, origins)
}

/// All non-overlapping literal occurrences of `query` in `text`.
///
/// Spans are half-open char offsets into the caller's original `text`,
/// even where lowercasing or composition changes the char count.
pub fn find_highlights(query: &str, text: &str) -> Vec<(usize, usize)> {
    let needle = normalize(query);
    if needle.is_empty() || text.is_empty() {
        return Vec::new();
    }
    let (haystack, origins) = fold_with_origins(text);

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(&needle) {
        let start = from + offset;
        let end = start + needle.len();
        from = end;

        let span = (origins[start].0, origins[end - 1].1);
        // two hits inside one original sequence collapse into the first
        if spans.last().is_some_and(|last| span.0 < last.1) {
            continue;
        }
        spans.push(span);
    }
    spans
}

/// Build the highlight entry for one field
pub fn highlight(field: &str, query: &str, text: &str) -> Highlight {
    Highlight {
        field: field.to_string(),
        text: text.to_string(),
        indices: find_highlights(query, text),
    }
}
