//! Core predicate trait.
//!
//! A [`Predicate`] is a side-effect-free eligibility check. It is generic over
//! the context type `C`, so the same combinators serve every job's tables.
//! Boxed predicates (`Box<dyn Predicate<C>>`) dispatch through auto-deref.

/// A boolean check evaluated against a read-only context.
pub trait Predicate<C>: Send + Sync {
    fn holds(&self, ctx: &C) -> bool;
}

/// Plain functions and closures are predicates.
impl<C, F> Predicate<C> for F
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn holds(&self, ctx: &C) -> bool {
        self(ctx)
    }
}
