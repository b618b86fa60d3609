//! Live validation of a pattern against a sample text.

use crate::engine::Engine;
use crate::options::ModifierString;

/// The outcome of validating the current inputs.
///
/// A compile fault and a match result can never coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validation {
    /// Nothing to report: the pattern or the sample is empty.
    #[default]
    Unevaluated,
    /// The engine rejected the pattern; carries its message verbatim.
    CompileFailed(String),
    /// The pattern compiled and was run against a non-empty sample.
    Evaluated(bool),
}

impl Validation {
    /// False only while the pattern fails to compile.
    pub fn pattern_valid(&self) -> bool {
        !matches!(self, Validation::CompileFailed(_))
    }

    pub fn compile_error(&self) -> Option<&str> {
        match self {
            Validation::CompileFailed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn match_result(&self) -> Option<bool> {
        match self {
            Validation::Evaluated(matched) => Some(*matched),
            _ => None,
        }
    }

    /// The pass/fail indicator. Compile faults read as unknown here; they are
    /// reported through [`Validation::compile_error`] instead.
    pub fn status(&self) -> Status {
        match self.match_result() {
            Some(true) => Status::Matches,
            Some(false) => Status::DoesNotMatch,
            None => Status::Unknown,
        }
    }
}

/// The collapsed pass/fail indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Unknown,
    Matches,
    DoesNotMatch,
}

/// Compile `pattern` under `modifiers` and test it against `sample`.
pub fn validate(
    engine: &dyn Engine,
    pattern: &str,
    modifiers: &ModifierString,
    sample: &str,
) -> Validation {
    if pattern.is_empty() {
        return Validation::Unevaluated;
    }
    let matcher = match engine.compile(pattern, modifiers) {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::debug!(%pattern, %modifiers, error = %e, "pattern failed to compile");
            return Validation::CompileFailed(e.to_string());
        }
    };
    if sample.is_empty() {
        return Validation::Unevaluated;
    }
    Validation::Evaluated(matcher.is_match(sample))
}
