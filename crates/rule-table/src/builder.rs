//! Builder utilities for ergonomic rule construction.
//!
//! Instead of writing `All::new(vec![Box::new(a), Box::new(b)])`,
//! write `all(vec![when(a), when(b)])`. Combinators come back unboxed so they
//! can go straight into [`RuleEntry::when`](crate::RuleEntry::when); wrap them
//! in [`when`] to nest them.

use crate::{All, Any, Not, Predicate};

/// Boxes a predicate (usually a closure).
#[inline]
pub fn when<C, P>(predicate: P) -> Box<dyn Predicate<C>>
where
    C: 'static,
    P: Predicate<C> + 'static,
{
    Box::new(predicate)
}

/// Shorthand for `All::new(children)`.
#[inline]
pub fn all<C: 'static>(children: Vec<Box<dyn Predicate<C>>>) -> All<C> {
    All::new(children)
}

/// Shorthand for `Any::new(children)`.
#[inline]
pub fn any<C: 'static>(children: Vec<Box<dyn Predicate<C>>>) -> Any<C> {
    Any::new(children)
}

/// Shorthand for `Not::new(child)`.
#[inline]
pub fn not<C: 'static>(child: Box<dyn Predicate<C>>) -> Not<C> {
    Not::new(child)
}

/// A predicate that always holds.
#[inline]
pub fn always<C: 'static>() -> Box<dyn Predicate<C>> {
    Box::new(|_: &C| true)
}
