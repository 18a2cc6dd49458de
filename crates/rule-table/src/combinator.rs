//! Predicate combinators.
//!
//! [`All`] (AND), [`Any`] (OR) and [`Not`] compose named predicates into the
//! compound eligibility checks a rule needs, without collapsing them into one
//! opaque closure.

use crate::Predicate;

/// Holds when every child holds.
///
/// Children are checked left to right and the first failing child
/// short-circuits, like `&&`. An empty list holds.
pub struct All<C> {
    children: Vec<Box<dyn Predicate<C>>>,
}

impl<C> All<C> {
    pub fn new(children: Vec<Box<dyn Predicate<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Predicate<C> for All<C> {
    fn holds(&self, ctx: &C) -> bool {
        self.children.iter().all(|child| child.holds(ctx))
    }
}

/// Holds when at least one child holds.
///
/// Short-circuits on the first holding child, like `||`. An empty list does
/// not hold.
pub struct Any<C> {
    children: Vec<Box<dyn Predicate<C>>>,
}

impl<C> Any<C> {
    pub fn new(children: Vec<Box<dyn Predicate<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Predicate<C> for Any<C> {
    fn holds(&self, ctx: &C) -> bool {
        self.children.iter().any(|child| child.holds(ctx))
    }
}

/// Negates its child.
pub struct Not<C> {
    child: Box<dyn Predicate<C>>,
}

impl<C> Not<C> {
    pub fn new(child: Box<dyn Predicate<C>>) -> Self {
        Self { child }
    }
}

impl<C> Predicate<C> for Not<C> {
    fn holds(&self, ctx: &C) -> bool {
        !self.child.holds(ctx)
    }
}
