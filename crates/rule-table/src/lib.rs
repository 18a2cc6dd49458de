//! Ordered, first-match priority rule tables.
//!
//! A [`RuleTable`] is a positional list of [`RuleEntry`] values for one
//! decision domain. Evaluation walks the list in rank order and returns the
//! first entry whose policy flag is enabled, whose predicate holds and whose
//! candidate action is usable. Nothing is mutated during evaluation, so the
//! same context always yields the same [`Selection`].
//!
//! - **Data, not control flow**: entries can be enumerated and toggled one by one
//! - **No hidden state**: time-window checks read the context, never a counter
//! - **Zero dependencies**: the crate only knows the [`RuleContext`] seam
//!
//! # Architecture
//!
//! - [`Predicate`]: eligibility check over a context
//! - Combinators: [`All`], [`Any`], [`Not`] and the [`builder`] helpers
//! - [`Candidate`]: a fixed action or one resolved from the context
//! - [`RuleTable`]: ordered entries plus [`RuleTable::evaluate`]

pub mod builder;
pub mod combinator;
pub mod context;
pub mod predicate;
pub mod table;

pub use combinator::{All, Any, Not};
pub use context::RuleContext;
pub use predicate::Predicate;
pub use table::{Candidate, RuleEntry, RuleTable, Selection};
