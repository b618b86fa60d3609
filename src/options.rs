//! Matching options and their modifier-string encoding.
//!
//! Six independent options map to single-character modifier codes. The
//! modifier string always lists enabled codes in canonical order, whatever
//! order the options were toggled in.

use std::fmt;

use phf::{Map, phf_map};

/// One toggleable matching option.
///
/// Variants are declared in canonical modifier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOption {
    Global,
    IgnoreCase,
    Multiline,
    DotAll,
    Unicode,
    Sticky,
}

impl MatchOption {
    /// All options, in canonical modifier order.
    pub const ALL: [MatchOption; 6] = [
        MatchOption::Global,
        MatchOption::IgnoreCase,
        MatchOption::Multiline,
        MatchOption::DotAll,
        MatchOption::Unicode,
        MatchOption::Sticky,
    ];

    /// The single-character modifier code.
    pub fn code(self) -> char {
        match self {
            MatchOption::Global => 'g',
            MatchOption::IgnoreCase => 'i',
            MatchOption::Multiline => 'm',
            MatchOption::DotAll => 's',
            MatchOption::Unicode => 'u',
            MatchOption::Sticky => 'y',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchOption::Global => "Global",
            MatchOption::IgnoreCase => "Case Insensitive",
            MatchOption::Multiline => "Multiline",
            MatchOption::DotAll => "Dot All",
            MatchOption::Unicode => "Unicode",
            MatchOption::Sticky => "Sticky",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MatchOption::Global => "Find all matches",
            MatchOption::IgnoreCase => "Ignore case",
            MatchOption::Multiline => "^ and $ match line breaks",
            MatchOption::DotAll => ". matches newlines",
            MatchOption::Unicode => "Unicode support",
            MatchOption::Sticky => "Match from the start offset",
        }
    }

    /// Look up an option by its modifier code.
    pub fn from_code(code: char) -> Option<MatchOption> {
        CODE_TO_OPTION.get(&code).copied()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Modifier codes understood by the engine.
const CODE_TO_OPTION: Map<char, MatchOption> = phf_map! {
    'g' => MatchOption::Global,
    'i' => MatchOption::IgnoreCase,
    'm' => MatchOption::Multiline,
    's' => MatchOption::DotAll,
    'u' => MatchOption::Unicode,
    'y' => MatchOption::Sticky,
};

/// Errors from parsing a modifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierError {
    Unknown(char),
    Repeated(char),
}

impl fmt::Display for ModifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(c) => write!(f, "Invalid flags: unknown modifier '{c}'"),
            Self::Repeated(c) => write!(f, "Invalid flags: modifier '{c}' given more than once"),
        }
    }
}

impl std::error::Error for ModifierError {}

/// The state of all six options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionSet {
    enabled: [bool; 6],
}

impl Default for OptionSet {
    /// Only `Global` is enabled.
    fn default() -> Self {
        let mut set = Self::none();
        set.set(MatchOption::Global, true);
        set
    }
}

impl OptionSet {
    /// An option set with every option disabled.
    pub fn none() -> Self {
        Self {
            enabled: [false; 6],
        }
    }

    pub fn get(&self, option: MatchOption) -> bool {
        self.enabled[option.index()]
    }

    pub fn set(&mut self, option: MatchOption, on: bool) {
        self.enabled[option.index()] = on;
    }

    /// Flip one option, returning its new state.
    pub fn toggle(&mut self, option: MatchOption) -> bool {
        let on = !self.get(option);
        self.set(option, on);
        on
    }

    /// Iterate `(option, enabled)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MatchOption, bool)> + '_ {
        MatchOption::ALL
            .into_iter()
            .map(move |opt| (opt, self.get(opt)))
    }

    /// Parse a modifier string such as `"gim"`.
    ///
    /// Codes may appear in any order, but each at most once.
    pub fn from_modifiers(modifiers: &str) -> Result<Self, ModifierError> {
        let mut set = Self::none();
        for code in modifiers.chars() {
            let option = MatchOption::from_code(code).ok_or(ModifierError::Unknown(code))?;
            if set.get(option) {
                return Err(ModifierError::Repeated(code));
            }
            set.set(option, true);
        }
        Ok(set)
    }
}

/// Enabled modifier codes in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ModifierString(String);

impl ModifierString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModifierString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode an option set as its canonical modifier string.
pub fn encode(options: &OptionSet) -> ModifierString {
    ModifierString(
        options
            .iter()
            .filter(|&(_, on)| on)
            .map(|(opt, _)| opt.code())
            .collect(),
    )
}
