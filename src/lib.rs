//! Trampex - Stack-Safe Regular Expression Matching
//!
//! This library matches strings against regular expressions built from four
//! combinators (literal, concatenation, alternation, repetition) plus an
//! always-failing empty expression. Matching is evaluated by a trampoline:
//! every "what happens after this subexpression returns" is a `Continuation`
//! value, and a flat loop drives `WorkItem`s until a terminal result appears.
//! Native stack depth is therefore constant, however deeply an expression is
//! nested and however many times a repetition loops.
//!
//! # Architecture
//!
//! 1. **Expression Grammar** (`expr` module)
//!    - Immutable, reference-counted expression trees
//!    - Iterative printing, measuring, and dropping
//!
//! 2. **Trampoline** (`trampoline` module)
//!    - `Continuation`: `Done`, `AfterConcat`, `AfterAlternate`, `AfterRepeat`
//!    - `WorkItem`: `Eval`, `Resume`, `Finished`
//!    - The driver loop and its continuation store
//!
//! 3. **Matching** (`matcher` module)
//!    - `Expr::matches` for whole-input matches under default settings
//!    - `Matcher` for configured matching (step limits, zero-width policy)
//!
//! # Example
//!
//! ```rust
//! use trampex::literal;
//!
//! let scala = literal("Sca")
//!     .concat(&literal("la"))
//!     .concat(&literal("la").star());
//!
//! assert!(scala.matches("Scalalala"));
//! assert!(!scala.matches("Scalaland"));
//! ```
//!
//! # Matching Semantics
//!
//! - **Whole input**: a match must end exactly at the end of the input
//! - **Committed choice**: alternation never revisits its first branch once it succeeded
//! - **Greedy repetition**: a repetition keeps going while its body matches, without backtracking
//! - **Zero-width repetition**: by default a repetition stops once an iteration does not advance
//!   (see `ZeroWidthPolicy`)

pub mod config;
pub mod error;
pub mod expr;
pub mod matcher;
pub mod pattern_file;
pub mod trampoline;

pub use config::{MatchConfig, ZeroWidthPolicy};
pub use error::{MatchError, MatchResult};
pub use expr::{empty, literal, Expr, ExprKind};
pub use matcher::Matcher;
pub use pattern_file::{Case, ExprDef, PatternFile};
