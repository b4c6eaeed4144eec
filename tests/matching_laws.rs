//! Matching laws
//!
//! Whole-input consumption, committed concatenation and alternation,
//! zero-or-more repetition, and literal exactness, checked through the
//! public API only.

use trampex::{empty, literal, Expr, MatchConfig, MatchError, Matcher, ZeroWidthPolicy};

fn scala() -> Expr {
    literal("Sca")
        .concat(&literal("la"))
        .concat(&literal("la").repeat())
}

#[test]
fn test_scala_scenario_table() {
    let cases = [
        ("Scala", true),
        ("Scalalalala", true),
        ("Sca", false),
        ("Scalal", false),
        ("Scalaland", false),
    ];
    let e = scala();
    for (input, expected) in cases {
        assert_eq!(e.matches(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_full_consumption_law() {
    let matcher = Matcher::default();
    let e = scala();
    for input in ["Scala", "Scalala", "Scalaland", "Scalal", "Sca", ""] {
        let end = matcher.find_end(&e, input).unwrap();
        assert_eq!(e.matches(input), end == Some(input.len()), "input {:?}", input);
    }
}

#[test]
fn test_determinism() {
    let e = literal("x").alternate(&literal("y")).repeat();
    for _ in 0..10 {
        assert!(e.matches("xyyx"));
        assert!(!e.matches("xyz"));
    }
}

#[test]
fn test_concatenation_commits_to_first_split() {
    // The greedy repeat swallows both "a"s, and the engine never gives one back.
    let e = literal("a").repeat().concat(&literal("a"));
    assert!(!e.matches("aa"));
    assert!(!e.matches("a"));

    let e = literal("a").repeat().concat(&literal("b"));
    assert!(e.matches("aaab"));
    assert!(e.matches("b"));
}

#[test]
fn test_alternation_commitment_law() {
    // "a" succeeds first, so "ab" is never tried even though it would consume everything.
    let e = literal("a").alternate(&literal("ab"));
    assert!(!e.matches("ab"));
    assert!(e.matches("a"));

    let e = literal("ab").alternate(&literal("a"));
    assert!(e.matches("ab"));
    assert!(e.matches("a"));

    let e = literal("a").alternate(&literal("ab")).concat(&literal("c"));
    assert!(e.matches("ac"));
    assert!(!e.matches("abc"));
}

#[test]
fn test_alternation_falls_back_from_start_position() {
    let e = literal("x").concat(&literal("abd").alternate(&literal("abc")));
    assert!(e.matches("xabc"));
    assert!(e.matches("xabd"));
    assert!(!e.matches("xab"));
}

#[test]
fn test_repetition_zero_match_law() {
    let matcher = Matcher::default();
    for body in [literal("a"), empty(), literal("xyz")] {
        let e = body.repeat();
        assert_eq!(matcher.find_end(&e, "qqq").unwrap(), Some(0));
        assert!(e.matches(""));
    }
}

#[test]
fn test_literal_exactness() {
    let e = literal("abc");
    assert!(e.matches("abc"));
    assert!(!e.matches("ab"));
    assert!(!e.matches("abcd"));
    assert!(!e.matches(""));
    assert!(!e.matches("xbc"));
}

#[test]
fn test_empty_never_matches() {
    assert!(!empty().matches(""));
    assert!(!empty().concat(&literal("a")).matches("a"));
    assert!(empty().alternate(&literal("a")).matches("a"));
}

#[test]
fn test_unicode_positions_are_byte_offsets() {
    let e = literal("é").repeat().concat(&literal("ß"));
    assert!(e.matches("ééß"));
    let end = Matcher::default().find_end(&literal("é"), "éx").unwrap();
    assert_eq!(end, Some("é".len()));
}

#[test]
fn test_star_is_repeat() {
    assert_eq!(literal("a").star().to_string(), literal("a").repeat().to_string());
    assert!(literal("ab").star().matches("ababab"));
}

#[test]
fn test_zero_width_guard_is_default() {
    let e = literal("").repeat();
    assert!(e.matches(""));

    let e = literal("a").repeat().repeat().concat(&literal("b"));
    assert!(e.matches("aaab"));
}

#[test]
fn test_faithful_zero_width_needs_step_limit() {
    let matcher = Matcher::new(MatchConfig {
        zero_width: ZeroWidthPolicy::Faithful,
        max_steps: Some(50_000),
    });
    let e = literal("a").repeat().repeat();
    assert_eq!(
        matcher.is_match(&e, "aa").unwrap_err(),
        MatchError::StepLimitExceeded { limit: 50_000 }
    );
}

#[test]
fn test_step_limit_applies_to_terminating_matches() {
    let matcher = Matcher::new(MatchConfig {
        max_steps: Some(20),
        ..MatchConfig::default()
    });
    let input = "a".repeat(100);
    assert!(matcher.is_match(&literal("a").repeat(), &input).is_err());
    assert!(matcher.is_match(&literal("a").repeat(), "aa").unwrap());
}
