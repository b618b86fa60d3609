//! The pattern-matching engine seam.
//!
//! The validator never interprets pattern syntax itself. It asks an
//! [`Engine`] to compile the pattern under a modifier string and then asks the
//! resulting [`Matcher`] whether a sample contains a match.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::options::{MatchOption, ModifierError, ModifierString, OptionSet};

/// Why a pattern failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The modifier string itself is invalid.
    Modifiers(ModifierError),
    /// The engine rejected the pattern; carries the engine's own message.
    Syntax(String),
    /// The compiled program would exceed the engine's size limit.
    TooLarge(usize),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modifiers(e) => write!(f, "{e}"),
            Self::Syntax(msg) => f.write_str(msg),
            Self::TooLarge(limit) => {
                write!(f, "Pattern too large: compiled size exceeds {limit} bytes")
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<regex::Error> for CompileError {
    fn from(err: regex::Error) -> Self {
        match err {
            regex::Error::Syntax(msg) => CompileError::Syntax(msg),
            regex::Error::CompiledTooBig(limit) => CompileError::TooLarge(limit),
            other => CompileError::Syntax(other.to_string()),
        }
    }
}

/// A compiled pattern.
pub trait Matcher {
    /// Whether at least one match exists in `sample`.
    fn is_match(&self, sample: &str) -> bool;
}

/// Compiles patterns into matchers.
pub trait Engine {
    fn compile(
        &self,
        pattern: &str,
        modifiers: &ModifierString,
    ) -> Result<Box<dyn Matcher>, CompileError>;
}

/// Engine backed by the `regex` crate.
///
/// Patterns and samples are always matched as Unicode text, so `.`, negated
/// classes and non-ASCII literals work on whole characters.
///
/// Modifier mapping:
///
/// | Code | Effect                                                  |
/// |------|---------------------------------------------------------|
/// | `g`  | None (a single test always starts at offset 0)          |
/// | `i`  | Case-insensitive matching                               |
/// | `m`  | `^` and `$` match at line breaks                        |
/// | `s`  | `.` matches `\n`                                        |
/// | `u`  | Unicode-aware `\d`, `\w` and `\b`; ASCII-only otherwise   |
/// | `y`  | A match must begin at offset 0                          |
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEngine;

impl Engine for RegexEngine {
    fn compile(
        &self,
        pattern: &str,
        modifiers: &ModifierString,
    ) -> Result<Box<dyn Matcher>, CompileError> {
        let options =
            OptionSet::from_modifiers(modifiers.as_str()).map_err(CompileError::Modifiers)?;
        let source = if options.get(MatchOption::Unicode) {
            pattern.to_string()
        } else {
            ascii_classes(pattern)
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(options.get(MatchOption::IgnoreCase))
            .multi_line(options.get(MatchOption::Multiline))
            .dot_matches_new_line(options.get(MatchOption::DotAll))
            .build()?;
        Ok(Box::new(RegexMatcher {
            regex,
            sticky: options.get(MatchOption::Sticky),
        }))
    }
}

/// Narrow the shorthand classes and word boundaries to ASCII.
///
/// Negated classes become explicit Unicode sets, since an ASCII-only negation
/// could match part of a multi-byte character. The class forms are valid
/// both inside and outside brackets as nested sets.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some('w') => out.push_str("[0-9A-Za-z_]"),
            Some('W') => out.push_str("[^0-9A-Za-z_]"),
            Some('b') => out.push_str(r"(?-u:\b)"),
            Some('B') => out.push_str(r"(?-u:\B)"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

struct RegexMatcher {
    regex: Regex,
    sticky: bool,
}

impl Matcher for RegexMatcher {
    fn is_match(&self, sample: &str) -> bool {
        if self.sticky {
            // Leftmost semantics: if any match starts at 0, the first one does.
            self.regex.find(sample).is_some_and(|m| m.start() == 0)
        } else {
            self.regex.is_match(sample)
        }
    }
}
