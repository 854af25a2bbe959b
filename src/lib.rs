//! A backtracking engine for a small regular-expression dialect.
//!
//! Patterns compile into a flat sequence of matcher units, each carrying
//! repetition bounds. Matching is whole-string: the unit sequence must
//! consume the subject exactly, and repetition counts are explored
//! greedy-first with backtracking on failure.
//!
//! # Pattern syntax
//!
//! | Token    | Meaning                                     |
//! |----------|---------------------------------------------|
//! | `c`      | One literal character                       |
//! | `.`      | Any one character                           |
//! | `[abc]`  | One character from the set                  |
//! | `[^abc]` | One character not in the set                |
//! | `\c`     | Literal `c`, even if `c` is an operator     |
//! | `X?`     | Zero or one `X`                             |
//! | `X*`     | Zero or more `X`                            |
//! | `X+`     | One or more `X`                             |
//!
//! There is no alternation, grouping, or anchoring; a pattern either covers
//! the whole subject or does not match.
//!
//! # Example
//!
//! ```rust
//! use backmatch::{compile, is_match};
//!
//! let pattern = compile("ab?c").unwrap();
//! assert!(is_match(&pattern, "abc"));
//! assert!(is_match(&pattern, "ac"));
//! assert!(!is_match(&pattern, "abbc"));
//!
//! // Greedy repetition backs off when the tail needs characters.
//! let pattern = compile("a*a").unwrap();
//! assert!(is_match(&pattern, "aaa"));
//! ```

pub mod char_class;
pub mod compiler;
pub mod matcher;
pub mod unit;

pub use char_class::ClassSet;
pub use compiler::{PatternError, compile};
pub use matcher::{is_match, match_with_trace};
pub use unit::{CompiledPattern, Repeats, Unit, UnitKind};
