//! An interactive regular-expression validator.
//!
//! A [`Session`] holds a pattern, a set of matching options and a sample
//! text. Every change recomputes the modifier string, a plain-English
//! explanation of the pattern and whether the sample matches.
//!
//! # Example
//!
//! ```rust
//! use regex_validator::{MatchOption, Session, Status};
//!
//! let mut session = Session::default();
//! session.set_pattern(r"^[a-z]+$");
//! session.set_sample("ABC");
//! assert_eq!(session.status(), Status::DoesNotMatch);
//!
//! // Case-insensitive matching flips the result.
//! session.toggle(MatchOption::IgnoreCase);
//! assert_eq!(session.modifiers().as_str(), "gi");
//! assert_eq!(session.status(), Status::Matches);
//!
//! assert!(session.explanation().starts_with("The text must match the entire string exactly"));
//! assert!(session.explanation().ends_with("case will be ignored"));
//! ```

pub mod app;
mod cell_buffer;
pub mod engine;
mod explain;
mod field;
pub mod keybind;
pub mod logging;
mod options;
pub mod presets;
pub mod report;
pub mod screen;
mod session;
pub mod terminal;
mod validation;

pub use cell_buffer::{Cell, CellBuffer, Tone};
pub use engine::{CompileError, Engine, Matcher, RegexEngine};
pub use explain::explain;
pub use field::Field;
pub use options::{MatchOption, ModifierError, ModifierString, OptionSet, encode};
pub use presets::Preset;
pub use session::{Input, Session};
pub use validation::{Status, Validation, validate};
