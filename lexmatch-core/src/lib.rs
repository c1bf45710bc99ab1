//! Lexmatch Core Library
//!
//! A pattern-matching engine fusing structural destructuring with a
//! restricted regex dialect. A *branch set* is a list of branches, each
//! pairing a pattern with a structural form — bare (whole input), two-part
//! (pattern plus rest), three-part (prefix, pattern, rest) or a catch-all —
//! evaluated under either first-match or longest-match selection.
//!
//! ```
//! use lexmatch_core::{compile, Binding, BranchSpec, Strategy, TargetKind, Value, View};
//!
//! let set = compile(
//!     Strategy::First,
//!     TargetKind::Char,
//!     &[BranchSpec::ThreePart {
//!         prefix: Binding::Wildcard,
//!         pattern: r#""ERROR" ("[0-9]+" as code)"#,
//!         rest: Binding::Named("rest".to_string()),
//!     }],
//! )
//! .unwrap();
//!
//! let outcome = set.eval("hello ERROR123 world");
//! let result = outcome.matched().unwrap();
//! assert_eq!(result.captures["code"], Value::View(View::Str("123")));
//! assert_eq!(result.rest, Some(View::Str(" world")));
//! ```

pub mod ast;
pub mod classes;
pub mod engine;
pub mod error;
pub mod input;
pub mod nfa;
pub mod parser;

mod first;
mod longest;

pub use ast::Pattern;
pub use engine::{compile, Binding, BranchSpec, CompiledSet, MatchOutcome, MatchResult, Strategy};
pub use error::{CompileError, ParseError, ParseErrorKind, Result};
pub use input::{TargetKind, Value, View};
pub use nfa::{Automaton, Edge, State, StateId, UnitTest};
pub use parser::parse_pattern;
