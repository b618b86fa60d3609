//! The validator's form state.
//!
//! A `Session` owns the three inputs (pattern, sample, options) and keeps the
//! derived values (modifier string, explanation, validation) in step with
//! them. Every mutation goes through a method that recomputes afterwards, so
//! the derived values can never be stale.

use crate::engine::{Engine, RegexEngine};
use crate::explain::explain;
use crate::field::Field;
use crate::options::{MatchOption, ModifierString, OptionSet, encode};
use crate::presets::Preset;
use crate::validation::{Status, Validation, validate};

/// Which text input an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Pattern,
    Sample,
}

pub struct Session {
    engine: Box<dyn Engine>,
    pattern: Field,
    sample: Field,
    options: OptionSet,
    pattern_text: String,
    sample_text: String,
    modifiers: ModifierString,
    explanation: String,
    validation: Validation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Box::new(RegexEngine))
    }
}

impl Session {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        let mut session = Self {
            engine,
            pattern: Field::new(),
            sample: Field::new(),
            options: OptionSet::default(),
            pattern_text: String::new(),
            sample_text: String::new(),
            modifiers: ModifierString::default(),
            explanation: String::new(),
            validation: Validation::Unevaluated,
        };
        session.recompute();
        session
    }

    pub fn pattern(&self) -> &str {
        &self.pattern_text
    }

    pub fn sample(&self) -> &str {
        &self.sample_text
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn modifiers(&self) -> &ModifierString {
        &self.modifiers
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn status(&self) -> Status {
        self.validation.status()
    }

    pub fn field(&self, input: Input) -> &Field {
        match input {
            Input::Pattern => &self.pattern,
            Input::Sample => &self.sample,
        }
    }

    fn field_mut(&mut self, input: Input) -> &mut Field {
        match input {
            Input::Pattern => &mut self.pattern,
            Input::Sample => &mut self.sample,
        }
    }

    /// Apply `edit` to one input field, then recompute.
    pub fn edit<R>(&mut self, input: Input, edit: impl FnOnce(&mut Field) -> R) -> R {
        let result = edit(self.field_mut(input));
        self.recompute();
        result
    }

    /// Scroll a field so its cursor is visible in `width` columns.
    /// Only the view changes, so nothing is recomputed.
    pub fn scroll_into_view(&mut self, input: Input, width: usize) {
        self.field_mut(input).fixup(width);
    }

    pub fn set_pattern(&mut self, pattern: &str) {
        self.edit(Input::Pattern, |f| f.set_text(pattern));
    }

    pub fn set_sample(&mut self, sample: &str) {
        self.edit(Input::Sample, |f| f.set_text(sample));
    }

    pub fn set_options(&mut self, options: OptionSet) {
        self.options = options;
        self.recompute();
    }

    /// Flip one option, returning its new state.
    pub fn toggle(&mut self, option: MatchOption) -> bool {
        let on = self.options.toggle(option);
        self.recompute();
        on
    }

    /// Overwrite the pattern with a preset's pattern.
    pub fn apply_preset(&mut self, preset: &Preset) {
        tracing::debug!(preset = preset.name, "applying preset");
        self.set_pattern(preset.pattern);
    }

    /// Empty both text inputs and restore default options.
    pub fn reset(&mut self) {
        self.pattern.clear();
        self.sample.clear();
        self.options = OptionSet::default();
        self.recompute();
    }

    /// The text sent to the clipboard: `/pattern/modifiers`.
    pub fn clipboard_literal(&self) -> String {
        format!("/{}/{}", self.pattern_text, self.modifiers)
    }

    fn recompute(&mut self) {
        self.pattern_text = self.pattern.to_string();
        self.sample_text = self.sample.to_string();
        self.modifiers = encode(&self.options);
        self.explanation = explain(&self.pattern_text, &self.options);
        self.validation = validate(
            self.engine.as_ref(),
            &self.pattern_text,
            &self.modifiers,
            &self.sample_text,
        );
        tracing::trace!(
            pattern = %self.pattern_text,
            modifiers = %self.modifiers,
            validation = ?self.validation,
            "recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::{EMPTY_PROMPT, PREFIX};
    use crate::presets::{self, PRESETS};

    #[test]
    fn test_new_session_defaults() {
        let session = Session::default();
        assert_eq!(session.pattern(), "");
        assert_eq!(session.sample(), "");
        assert_eq!(*session.options(), OptionSet::default());
        assert_eq!(session.modifiers().as_str(), "g");
        assert_eq!(session.explanation(), EMPTY_PROMPT);
        assert_eq!(*session.validation(), Validation::Unevaluated);
        assert_eq!(session.status(), Status::Unknown);
    }

    #[test]
    fn test_phone_scenario() {
        let mut session = Session::default();
        session.set_pattern(r"\d{3}-\d{3}-\d{4}");
        session.set_sample("Call 555-123-4567");
        assert_eq!(session.status(), Status::Matches);
        assert!(
            session
                .explanation()
                .contains("be a phone number format (XXX-XXX-XXXX)")
        );
        assert!(session.explanation().contains("be exactly 3 characters long"));
    }

    #[test]
    fn test_toggle_case_insensitive_rematches() {
        let mut session = Session::default();
        session.set_pattern("^[a-z]+$");
        session.set_sample("ABC");
        assert_eq!(session.status(), Status::DoesNotMatch);

        assert!(session.toggle(MatchOption::IgnoreCase));
        assert_eq!(session.modifiers().as_str(), "gi");
        assert_eq!(session.status(), Status::Matches);
        assert!(session.explanation().ends_with("case will be ignored"));
    }

    #[test]
    fn test_compile_fault_replaces_match_result() {
        let mut session = Session::default();
        session.set_pattern("abc");
        session.set_sample("abc");
        assert_eq!(session.status(), Status::Matches);

        session.edit(Input::Pattern, |f| f.insert_char('('));
        assert_eq!(session.pattern(), "abc(");
        assert!(!session.validation().pattern_valid());
        assert!(session.validation().compile_error().is_some());
        assert_eq!(session.status(), Status::Unknown);
        assert!(session.explanation().starts_with(PREFIX));
    }

    #[test]
    fn test_clearing_sample_clears_result() {
        let mut session = Session::default();
        session.set_pattern("a");
        session.set_sample("a");
        session.edit(Input::Sample, |f| f.delete_backward());
        assert_eq!(*session.validation(), Validation::Unevaluated);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = Session::default();
        session.set_pattern("x+");
        session.set_sample("xxx");
        session.toggle(MatchOption::Global);
        session.toggle(MatchOption::Sticky);
        session.toggle(MatchOption::Multiline);

        session.reset();
        assert_eq!(session.pattern(), "");
        assert_eq!(session.sample(), "");
        assert_eq!(*session.options(), OptionSet::default());
        assert_eq!(session.modifiers().as_str(), "g");
        assert_eq!(session.explanation(), EMPTY_PROMPT);
        assert_eq!(session.status(), Status::Unknown);
    }

    #[test]
    fn test_apply_preset_overwrites_pattern_only() {
        let mut session = Session::default();
        session.set_pattern("old");
        session.set_sample("see #a1b2c3");
        session.toggle(MatchOption::IgnoreCase);

        session.apply_preset(presets::find("hex").unwrap());
        assert_eq!(session.pattern(), PRESETS[4].pattern);
        assert_eq!(session.sample(), "see #a1b2c3");
        assert_eq!(session.modifiers().as_str(), "gi");
        assert_eq!(session.status(), Status::Matches);
    }

    #[test]
    fn test_clipboard_literal() {
        let mut session = Session::default();
        session.set_pattern(r"\d+");
        session.toggle(MatchOption::Multiline);
        assert_eq!(session.clipboard_literal(), r"/\d+/gm");
    }

    #[test]
    fn test_set_options_recomputes() {
        let mut session = Session::default();
        session.set_pattern("cat");
        session.set_options(OptionSet::from_modifiers("im").unwrap());
        assert_eq!(session.modifiers().as_str(), "im");
        assert!(session.explanation().contains("each line will be checked separately"));
    }
}
