//! Plain-language explanation of a pattern.
//!
//! The explanation is a best-effort reading of the pattern *source*. It never
//! compiles or runs the pattern and it never fails: an empty pattern yields a
//! prompt, and any internal fault yields [`FAULT_FALLBACK`].
//!
//! # Clauses
//!
//! The sentence is `"The text must "` followed by these clauses, in order,
//! skipping any that do not apply:
//!
//! | Clause         | Source                                              |
//! |----------------|-----------------------------------------------------|
//! | Anchoring      | Leading `^` / trailing `$` (always present)         |
//! | Length         | First `{m}` or `{m,n}`                              |
//! | Word boundary  | `\b`                                                |
//! | Domain shape   | Email, phone, URL or hex colour (first match wins)  |
//! | Characters     | `\d`, `\w`, `\s` and bracket-set contents           |
//! | Quantifier     | `+`, then `*`, then `?` (first match wins)          |
//! | Options        | Case-insensitive and multiline options              |

pub mod rules;

use anyhow::Result;
use itertools::Itertools;

use crate::options::{MatchOption, OptionSet};

use rules::{DOMAIN_SHAPES, QUANTIFIER_HINTS};

/// Shown when there is no pattern to explain.
pub const EMPTY_PROMPT: &str = "Enter a regex pattern to see its explanation";

/// Shown when the explanation could not be derived.
pub const FAULT_FALLBACK: &str = "Invalid regex pattern";

/// Every derived explanation starts with this.
pub const PREFIX: &str = "The text must ";

/// Explain what `pattern` requires of a text under `options`.
pub fn explain(pattern: &str, options: &OptionSet) -> String {
    if pattern.is_empty() {
        return EMPTY_PROMPT.to_string();
    }
    match clauses(pattern, options) {
        Ok(clauses) => format!("{PREFIX}{}", clauses.iter().join(", ")),
        Err(e) => {
            tracing::debug!(error = %e, "explanation fell back");
            FAULT_FALLBACK.to_string()
        }
    }
}

/// Derive each clause of the explanation, in sentence order.
pub fn clauses(pattern: &str, options: &OptionSet) -> Result<Vec<String>> {
    let (anchors, working) = rules::strip_anchors(pattern);
    let mut clauses = vec![rules::anchoring_phrase(anchors).to_string()];

    if let Some(bounds) = rules::first_bounds(working)? {
        clauses.push(rules::length_phrase(&bounds));
    }

    if working.contains(r"\b") {
        clauses.push("match complete words only".to_string());
    }

    if let Some(phrase) = rules::first_match(DOMAIN_SHAPES, working)? {
        clauses.push(phrase.to_string());
    }

    let categories = rules::character_categories(working)?;
    if let Some(list) = oxford_join(&categories) {
        clauses.push(format!("contain only {list}"));
    }

    if let Some(phrase) = rules::first_match(QUANTIFIER_HINTS, working)? {
        clauses.push(phrase.to_string());
    }

    if let Some(clause) = option_clause(options) {
        clauses.push(clause);
    }

    Ok(clauses)
}

/// `a`, `a and b`, or `a, b, and c`.
fn oxford_join(items: &[&str]) -> Option<String> {
    match items {
        [] => None,
        [only] => Some(only.to_string()),
        [first, second] => Some(format!("{first} and {second}")),
        [init @ .., last] => Some(format!("{}, and {last}", init.iter().join(", "))),
    }
}

fn option_clause(options: &OptionSet) -> Option<String> {
    let mut notes = Vec::new();
    if options.get(MatchOption::IgnoreCase) {
        notes.push("case will be ignored");
    }
    if options.get(MatchOption::Multiline) {
        notes.push("each line will be checked separately");
    }
    if notes.is_empty() {
        None
    } else {
        Some(notes.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use proptest::prelude::*;

    fn with(codes: &str) -> OptionSet {
        OptionSet::from_modifiers(codes).unwrap()
    }

    fn explain_default(pattern: &str) -> String {
        explain(pattern, &OptionSet::default())
    }

    fn option_set_from_bits(bits: u8) -> OptionSet {
        let mut options = OptionSet::none();
        for (i, opt) in MatchOption::ALL.iter().enumerate() {
            options.set(*opt, bits & (1 << i) != 0);
        }
        options
    }

    #[test]
    fn test_empty_pattern_prompt_for_every_option_set() {
        for bits in 0u8..64 {
            assert_eq!(explain("", &option_set_from_bits(bits)), EMPTY_PROMPT);
        }
    }

    #[test]
    fn test_plain_literal() {
        assert_eq!(explain_default("cat"), "The text must contain the pattern");
    }

    #[test]
    fn test_anchoring_variants() {
        assert_eq!(
            explain_default("^cat$"),
            "The text must match the entire string exactly"
        );
        assert_eq!(explain_default("^cat"), "The text must start with the pattern");
        assert_eq!(explain_default("cat$"), "The text must end with the pattern");
    }

    #[test]
    fn test_lowercase_word() {
        assert_eq!(
            explain_default("^[a-z]+$"),
            "The text must match the entire string exactly, \
             contain only lowercase letters and hyphens, \
             have one or more matching characters"
        );
    }

    #[test]
    fn test_phone_pattern() {
        assert_eq!(
            explain_default(r"\d{3}-\d{3}-\d{4}"),
            "The text must contain the pattern, \
             be exactly 3 characters long, \
             be a phone number format (XXX-XXX-XXXX), \
             contain only digits (0-9)"
        );
    }

    #[test]
    fn test_email_wins_over_phone() {
        let explanation = explain_default(r"\d{3}-\d{3}-\d{4}@example\.com");
        assert!(explanation.contains("be a valid email address format"));
        assert!(!explanation.contains("phone number"));
    }

    #[test]
    fn test_between_bounds() {
        assert!(explain_default("^a{2,8}$").contains("be between 2 and 8 characters long"));
    }

    #[test]
    fn test_word_boundary() {
        assert!(explain_default(r"\bcat\b").contains("match complete words only"));
    }

    #[test]
    fn test_three_categories_use_oxford_comma() {
        assert_eq!(
            explain_default(r"\d\w\s"),
            "The text must contain the pattern, contain only digits (0-9), \
             letters, numbers, and underscores, and whitespace characters"
        );
    }

    #[test]
    fn test_oxford_join() {
        assert_eq!(oxford_join(&[]), None);
        assert_eq!(oxford_join(&["a"]).as_deref(), Some("a"));
        assert_eq!(oxford_join(&["a", "b"]).as_deref(), Some("a and b"));
        assert_eq!(oxford_join(&["a", "b", "c"]).as_deref(), Some("a, b, and c"));
        assert_eq!(
            oxford_join(&["a", "b", "c", "d"]).as_deref(),
            Some("a, b, c, and d")
        );
    }

    #[test]
    fn test_quantifier_hints() {
        assert!(explain_default("ab*").ends_with("have zero or more matching characters"));
        assert!(explain_default("colou?r").ends_with("optionally contain the pattern"));
    }

    #[test]
    fn test_option_clauses() {
        assert_eq!(
            explain("cat", &with("gi")),
            "The text must contain the pattern, case will be ignored"
        );
        assert_eq!(
            explain("cat", &with("m")),
            "The text must contain the pattern, each line will be checked separately"
        );
        assert_eq!(
            explain("cat", &with("im")),
            "The text must contain the pattern, \
             case will be ignored and each line will be checked separately"
        );
        assert_eq!(explain("cat", &with("gsuy")), "The text must contain the pattern");
    }

    #[test]
    fn test_clause_order() {
        let clauses = clauses(r"^\b\d{4}[A-Fa-f0-9]#+$", &with("i")).unwrap();
        assert_eq!(
            clauses,
            [
                "match the entire string exactly",
                "be exactly 4 characters long",
                "match complete words only",
                "be a valid hex color code",
                "contain only digits (0-9), numbers, and hyphens",
                "have one or more matching characters",
                "case will be ignored",
            ]
        );
    }

    #[test]
    fn test_hex_preset() {
        let hex = presets::find("hex").unwrap();
        assert!(explain_default(hex.pattern).contains("be a valid hex color code"));
    }

    #[test]
    fn test_url_preset_reads_as_email() {
        // The URL preset contains both '@' and '\.', so the email shape wins.
        let url = presets::find("url").unwrap();
        let explanation = explain_default(url.pattern);
        assert!(explanation.contains("be a valid email address format"));
        assert!(!explanation.contains("be a valid URL"));
    }

    #[test]
    fn test_odd_inputs_never_fail() {
        for pattern in ["^", "$", "^$", "[", "]", "{", "{,}", "\\", "(((", "[]]", "é{2}", "\u{0}"] {
            let explanation = explain_default(pattern);
            assert!(
                explanation.starts_with(PREFIX) || explanation == FAULT_FALLBACK,
                "unexpected explanation for {pattern:?}: {explanation}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_explain_is_total(pattern in ".*", bits in 0u8..64) {
            let explanation = explain(&pattern, &option_set_from_bits(bits));
            prop_assert!(
                explanation == EMPTY_PROMPT
                    || explanation == FAULT_FALLBACK
                    || explanation.starts_with(PREFIX),
                "unexpected explanation for {:?}: {}",
                pattern,
                explanation
            );
        }
    }
}
