//! End-to-end scenarios over a single source/target pair under each of the
//! text equality policies.

use seqdist::algorithms::{
    damerau_levenshtein_by, hamming_by, jaro_winkler_similarity_by, levenshtein_by,
    longest_common_subsequence_length_by, longest_common_substring_length_by,
    optimal_string_alignment_by, Equality, Exact, IgnoreCase, IgnoreCaseAndDiacritics,
    IgnoreDiacritics,
};
use seqdist::{EqualityMode, MatchConfig, Metric, MetricError};

const SOURCE: &str = "Senor Hugo";
const TARGET: &str = "se\u{00F1}or hugo";

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

struct Expected {
    distance: usize,
    lcs: usize,
    substring: usize,
    jaro_winkler: f64,
}

fn check<E: Equality<char> + Copy>(label: &str, eq: E, expected: Expected) {
    let a = chars(SOURCE);
    let b = chars(TARGET);

    assert_eq!(hamming_by(&a, &b, eq), Ok(expected.distance), "{label}: hamming");
    assert_eq!(levenshtein_by(&a, &b, eq), expected.distance, "{label}: levenshtein");
    assert_eq!(
        damerau_levenshtein_by(&a, &b, eq),
        expected.distance,
        "{label}: damerau_levenshtein"
    );
    assert_eq!(
        optimal_string_alignment_by(&a, &b, eq),
        expected.distance,
        "{label}: optimal_string_alignment"
    );
    assert_eq!(
        longest_common_subsequence_length_by(&a, &b, eq),
        expected.lcs,
        "{label}: lcs"
    );
    assert_eq!(
        longest_common_substring_length_by(&a, &b, eq),
        expected.substring,
        "{label}: longest_common_substring"
    );

    let jw = jaro_winkler_similarity_by(&a, &b, eq);
    assert!(
        (jw - expected.jaro_winkler).abs() < 1e-4,
        "{label}: jaro_winkler {jw} vs {}",
        expected.jaro_winkler
    );
}

#[test]
fn exact_comparer() {
    check(
        "exact",
        Exact,
        Expected {
            distance: 3,
            lcs: 7,
            substring: 3,
            jaro_winkler: 0.8,
        },
    );
}

#[test]
fn case_insensitive_comparer() {
    check(
        "ignore_case",
        IgnoreCase,
        Expected {
            distance: 1,
            lcs: 9,
            substring: 7,
            jaro_winkler: 0.94667,
        },
    );
}

#[test]
fn diacritic_insensitive_comparer() {
    check(
        "ignore_diacritics",
        IgnoreDiacritics,
        Expected {
            distance: 2,
            lcs: 8,
            substring: 5,
            jaro_winkler: 0.86667,
        },
    );
}

#[test]
fn case_and_diacritic_insensitive_comparer() {
    check(
        "ignore_case_and_diacritics",
        IgnoreCaseAndDiacritics,
        Expected {
            distance: 0,
            lcs: 10,
            substring: 10,
            jaro_winkler: 1.0,
        },
    );
}

#[test]
fn closure_comparer_matches_unit_policy() {
    let a = chars(SOURCE);
    let b = chars(TARGET);
    let folded = |x: &char, y: &char| x.to_lowercase().eq(y.to_lowercase());
    assert_eq!(levenshtein_by(&a, &b, folded), levenshtein_by(&a, &b, IgnoreCase));
    assert_eq!(
        jaro_winkler_similarity_by(&a, &b, folded),
        jaro_winkler_similarity_by(&a, &b, IgnoreCase)
    );
}

#[test]
fn empty_source_against_non_empty_target() {
    let empty: Vec<char> = Vec::new();
    let b = chars(TARGET);

    assert_eq!(
        hamming_by(&empty, &b, Exact),
        Err(MetricError::LengthMismatch {
            source_len: 0,
            target_len: 10
        })
    );
    assert_eq!(levenshtein_by(&empty, &b, Exact), 10);
    assert_eq!(damerau_levenshtein_by(&empty, &b, Exact), 10);
    assert_eq!(optimal_string_alignment_by(&empty, &b, Exact), 10);
    assert_eq!(longest_common_subsequence_length_by(&empty, &b, Exact), 0);
    assert_eq!(longest_common_substring_length_by(&empty, &b, Exact), 0);
    assert_eq!(jaro_winkler_similarity_by(&empty, &b, Exact), 0.0);
    assert_eq!(hamming_by(&empty, &empty, Exact), Ok(0));
}

#[test]
fn token_sequences() {
    let a = ["the", "Quick", "brown", "fox"];
    let b = ["the", "quick", "fox", "brown"];
    assert_eq!(levenshtein_by(&a, &b, Exact), 3);
    assert_eq!(levenshtein_by(&a, &b, IgnoreCase), 2);
    assert_eq!(damerau_levenshtein_by(&a, &b, IgnoreCase), 1);
    assert_eq!(optimal_string_alignment_by(&a, &b, IgnoreCase), 1);
}

#[test]
fn metric_selection_by_name() {
    let metric: Metric = "osa".parse().unwrap();
    let score = metric
        .similarity_str(SOURCE, TARGET, EqualityMode::IgnoreCase)
        .unwrap();
    assert!((score - 0.9).abs() < 1e-12);

    let config: MatchConfig =
        serde_json::from_str(r#"{"metric": "jaro_winkler", "equality": "ignore_diacritics", "min_similarity": 0.85}"#)
            .unwrap();
    let matches = seqdist::batch::find_best_matches(SOURCE, &[TARGET, "Maria"], &config).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].index, 0);
    assert!((matches[0].score - 0.86667).abs() < 1e-4);
}
