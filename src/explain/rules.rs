//! Textual recognisers used by the explanation heuristic.
//!
//! Every rule reads the pattern source as plain text. Nothing here evaluates
//! the pattern, so escaped characters and unusual ranges inside bracket sets
//! are read literally: `[\-]` still counts as "hyphens".

use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;

type Shape = LazyLock<Result<Regex, regex::Error>>;

/// `{m}` or `{m,n}`.
static BOUNDED_REPETITION: Shape = LazyLock::new(|| Regex::new(r"\{([0-9]+)(?:,([0-9]+))?\}"));

/// Literal digit grouping such as `555-123-4567`.
static PHONE_DIGITS: Shape = LazyLock::new(|| Regex::new(r"[0-9]{3}.*[0-9]{3}.*[0-9]{4}"));

/// Token grouping such as `\d{3}-\d{3}-\d{4}`. Widens the literal-digit
/// shape above, which never sees digits in a pattern written with `\d`.
static PHONE_TOKENS: Shape =
    LazyLock::new(|| Regex::new(r"\\d\{3\}.*\\d\{3\}.*\\d\{4\}"));

/// A non-nested bracket set and its body.
static BRACKET_SET: Shape = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]"));

fn shape(cell: &'static Shape) -> Result<&'static Regex> {
    LazyLock::force(cell)
        .as_ref()
        .map_err(|e| anyhow!("heuristic shape failed to build: {e}"))
}

/// The anchors found at either end of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub start: bool,
    pub end: bool,
}

/// Strip one leading `^` and one trailing `$`, returning the working copy.
pub fn strip_anchors(pattern: &str) -> (Anchors, &str) {
    let (start, rest) = match pattern.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let end = pattern.ends_with('$');
    let working = rest.strip_suffix('$').unwrap_or(rest);
    (Anchors { start, end }, working)
}

pub fn anchoring_phrase(anchors: Anchors) -> &'static str {
    match (anchors.start, anchors.end) {
        (true, true) => "match the entire string exactly",
        (true, false) => "start with the pattern",
        (false, true) => "end with the pattern",
        (false, false) => "contain the pattern",
    }
}

/// Bounds of the first bounded-repetition quantifier, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounds<'a> {
    Exactly(&'a str),
    Between(&'a str, &'a str),
}

pub fn first_bounds(working: &str) -> Result<Option<Bounds<'_>>> {
    let Some(caps) = shape(&BOUNDED_REPETITION)?.captures(working) else {
        return Ok(None);
    };
    let min = caps
        .get(1)
        .ok_or_else(|| anyhow!("bounded repetition without a lower bound"))?
        .as_str();
    Ok(Some(match caps.get(2) {
        Some(max) => Bounds::Between(min, max.as_str()),
        None => Bounds::Exactly(min),
    }))
}

pub fn length_phrase(bounds: &Bounds<'_>) -> String {
    match bounds {
        Bounds::Exactly(n) => format!("be exactly {n} characters long"),
        Bounds::Between(m, n) => format!("be between {m} and {n} characters long"),
    }
}

/// A guarded rule: the phrase applies when the predicate holds.
pub type Rule = (fn(&str) -> Result<bool>, &'static str);

/// Domain shapes, highest priority first.
pub const DOMAIN_SHAPES: &[Rule] = &[
    (looks_like_email, "be a valid email address format"),
    (looks_like_phone, "be a phone number format (XXX-XXX-XXXX)"),
    (looks_like_url, "be a valid URL starting with http or https"),
    (looks_like_hex_color, "be a valid hex color code"),
];

/// Quantifier hints, highest priority first.
pub const QUANTIFIER_HINTS: &[Rule] = &[
    (repeats_one_or_more, "have one or more matching characters"),
    (repeats_zero_or_more, "have zero or more matching characters"),
    (is_optional, "optionally contain the pattern"),
];

/// Evaluate `rules` in order and return the phrase of the first that holds.
pub fn first_match(rules: &[Rule], working: &str) -> Result<Option<&'static str>> {
    for &(holds, phrase) in rules {
        if holds(working)? {
            return Ok(Some(phrase));
        }
    }
    Ok(None)
}

fn repeats_one_or_more(working: &str) -> Result<bool> {
    Ok(working.contains('+'))
}

fn repeats_zero_or_more(working: &str) -> Result<bool> {
    Ok(working.contains('*'))
}

fn is_optional(working: &str) -> Result<bool> {
    Ok(working.contains('?'))
}

fn looks_like_email(working: &str) -> Result<bool> {
    Ok(working.contains('@') && working.contains(r"\."))
}

fn looks_like_phone(working: &str) -> Result<bool> {
    Ok(shape(&PHONE_DIGITS)?.is_match(working) || shape(&PHONE_TOKENS)?.is_match(working))
}

fn looks_like_url(working: &str) -> Result<bool> {
    Ok(working.contains("https?"))
}

fn looks_like_hex_color(working: &str) -> Result<bool> {
    Ok(working.contains('#') && working.contains("[A-Fa-f0-9]"))
}

/// Shorthand class escapes and their phrases, in reporting order.
const CLASS_ESCAPES: &[(&str, &str)] = &[
    (r"\d", "digits (0-9)"),
    (r"\w", "letters, numbers, and underscores"),
    (r"\s", "whitespace characters"),
];

/// Bracket-set contents and their phrases, in reporting order.
const SET_INDICATORS: &[(&str, &str)] = &[
    ("a-z", "lowercase letters"),
    ("A-Z", "uppercase letters"),
    ("0-9", "numbers"),
    (" ", "spaces"),
    ("-", "hyphens"),
    ("'", "apostrophes"),
    ("&", "ampersands"),
    (",", "commas"),
    ("/", "forward slashes"),
    (".", "periods"),
    ("@", "at symbols"),
];

/// Collect character-category phrases. Duplicates are kept.
pub fn character_categories(working: &str) -> Result<Vec<&'static str>> {
    let mut phrases: Vec<&'static str> = CLASS_ESCAPES
        .iter()
        .filter(|(escape, _)| working.contains(escape))
        .map(|&(_, phrase)| phrase)
        .collect();

    for caps in shape(&BRACKET_SET)?.captures_iter(working) {
        let body = caps
            .get(1)
            .ok_or_else(|| anyhow!("bracket set without a body"))?
            .as_str();
        phrases.extend(
            SET_INDICATORS
                .iter()
                .filter(|(needle, _)| body.contains(needle))
                .map(|&(_, phrase)| phrase),
        );
    }
    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_anchors() {
        assert_eq!(
            strip_anchors("^abc$"),
            (
                Anchors {
                    start: true,
                    end: true
                },
                "abc"
            )
        );
        assert_eq!(strip_anchors("^abc").1, "abc");
        assert_eq!(strip_anchors("abc$").1, "abc");
        assert_eq!(strip_anchors("^^a$$").1, "^a$");
    }

    #[test]
    fn test_strip_anchors_single_marker() {
        let (anchors, working) = strip_anchors("^");
        assert!(anchors.start && !anchors.end);
        assert_eq!(working, "");

        let (anchors, working) = strip_anchors("$");
        assert!(!anchors.start && anchors.end);
        assert_eq!(working, "");
    }

    #[test]
    fn test_first_bounds() {
        assert_eq!(first_bounds("a{3}").unwrap(), Some(Bounds::Exactly("3")));
        assert_eq!(
            first_bounds("a{2,5}b{9}").unwrap(),
            Some(Bounds::Between("2", "5"))
        );
        assert_eq!(first_bounds("a{2,}").unwrap(), None);
        assert_eq!(first_bounds("abc").unwrap(), None);
    }

    #[test]
    fn test_open_ended_bound_skipped_for_later_one() {
        assert_eq!(
            first_bounds("a{2,}b{4}").unwrap(),
            Some(Bounds::Exactly("4"))
        );
    }

    #[test]
    fn test_domain_priority_email_over_phone() {
        let working = r"555-123-4567@x\.com";
        assert_eq!(
            first_match(DOMAIN_SHAPES, working).unwrap(),
            Some("be a valid email address format")
        );
    }

    #[test]
    fn test_url_shape() {
        assert_eq!(
            first_match(DOMAIN_SHAPES, "https?://x").unwrap(),
            Some("be a valid URL starting with http or https")
        );
        assert!(!looks_like_url("http://x").unwrap());
    }

    #[test]
    fn test_domain_priority_url_over_hex() {
        assert_eq!(
            first_match(DOMAIN_SHAPES, "https?://#[A-Fa-f0-9]{6}").unwrap(),
            Some("be a valid URL starting with http or https")
        );
        assert_eq!(
            first_match(DOMAIN_SHAPES, "#[A-Fa-f0-9]{6}").unwrap(),
            Some("be a valid hex color code")
        );
    }

    #[test]
    fn test_domain_priority_phone_over_url() {
        assert_eq!(
            first_match(DOMAIN_SHAPES, r"https?://\d{3}-\d{3}-\d{4}").unwrap(),
            Some("be a phone number format (XXX-XXX-XXXX)")
        );
    }

    #[test]
    fn test_no_domain_shape() {
        assert_eq!(first_match(DOMAIN_SHAPES, "[a-z]+").unwrap(), None);
    }

    #[test]
    fn test_phone_shapes() {
        assert!(looks_like_phone("555-123-4567").unwrap());
        assert!(looks_like_phone(r"\d{3}-\d{3}-\d{4}").unwrap());
        assert!(!looks_like_phone(r"\d{3}-\d{4}").unwrap());
    }

    #[test]
    fn test_hex_color_needs_exact_class() {
        assert!(looks_like_hex_color("#[A-Fa-f0-9]{6}").unwrap());
        assert!(!looks_like_hex_color("#[a-f0-9]{6}").unwrap());
    }

    #[test]
    fn test_quantifier_priority() {
        assert_eq!(
            first_match(QUANTIFIER_HINTS, "a*b+c?").unwrap(),
            Some("have one or more matching characters")
        );
        assert_eq!(
            first_match(QUANTIFIER_HINTS, "a*c?").unwrap(),
            Some("have zero or more matching characters")
        );
        assert_eq!(
            first_match(QUANTIFIER_HINTS, "colou?r").unwrap(),
            Some("optionally contain the pattern")
        );
        assert_eq!(first_match(QUANTIFIER_HINTS, "abc").unwrap(), None);
    }

    #[test]
    fn test_categories_from_escapes() {
        assert_eq!(
            character_categories(r"\s\w\d").unwrap(),
            [
                "digits (0-9)",
                "letters, numbers, and underscores",
                "whitespace characters"
            ]
        );
    }

    #[test]
    fn test_categories_from_sets_keep_duplicates() {
        assert_eq!(
            character_categories("[a-z][a-z0-9]").unwrap(),
            [
                "lowercase letters",
                "hyphens",
                "lowercase letters",
                "numbers",
                "hyphens"
            ]
        );
    }

    #[test]
    fn test_range_implies_hyphen() {
        assert_eq!(
            character_categories("[A-Z]").unwrap(),
            ["uppercase letters", "hyphens"]
        );
    }

    #[test]
    fn test_escaped_hyphen_read_literally() {
        assert_eq!(character_categories(r"[\-]").unwrap(), ["hyphens"]);
    }

    #[test]
    fn test_all_set_indicators_in_order() {
        assert_eq!(
            character_categories("[@./,&' -]").unwrap(),
            [
                "spaces",
                "hyphens",
                "apostrophes",
                "ampersands",
                "commas",
                "forward slashes",
                "periods",
                "at symbols"
            ]
        );
    }

    #[test]
    fn test_empty_brackets_are_not_a_set() {
        assert!(character_categories("[]").unwrap().is_empty());
    }
}
