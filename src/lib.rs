//! regexp - Regexp and MatchData semantics over a pluggable matching engine
//!
//! ## Usage
//! see pattern.rs test mod
//!
//! ## Layers
//!
//! ```plain
//!     Engine / Program    compile a source, search a subject, escape a literal.
//!                         `RegexEngine` (the `regex` crate) is the default.
//!
//!     Pattern             source + option bits + compiled program.
//!                         captures, search (=~), case_eq (===),
//!                         search_last_input (~).
//!
//!     MatchResult         view over one match: at, offset, captures,
//!                         pre_match, post_match, values_at, slice.
//! ```
//!
//! ## Absence
//!
//! A failed match, a group that did not participate, and an index out of
//! range are all `None`. Only a malformed pattern is an error
//! (`PatternError`).
//!
//! ## Example
//!
//! ```plain
//!     Pattern::new(r"(\d)(x)?(\d+)")?.captures("abc123def")
//!     result :
//!         at(0)       Some("123")
//!         at(1)       Some("1")
//!         at(2)       None
//!         at(3)       Some("23")
//!         at(4)       None
//!         pre_match   "abc"
//!         post_match  "def"
//!         {:?}        #<MatchData "123" 1:"1" 2:nil 3:"23">
//!
//!     Pattern::new(r"\d")?.case_eq(&Symbol::new("foo1"))
//!     result :
//!         true
//! ```
//!
#[macro_use]
extern crate enum_display_derive;

mod context;
mod engine;
mod error;
mod match_result;
mod operand;
mod options;
mod pattern;
mod regex_engine;

pub use context::InputContext;
pub use engine::{Engine, Program, RawMatch, Span};
pub use error::PatternError;
pub use match_result::MatchResult;
pub use operand::{Operand, OperandKind, Symbol};
pub use options::{Encoding, Options, ParseOptionsError};
pub use pattern::{CompileOptions, Pattern};
pub use regex_engine::RegexEngine;
