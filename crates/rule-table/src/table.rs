//! Rule entries and the first-match table.

use std::fmt;

use crate::builder::always;
use crate::{Predicate, RuleContext};

/// The action a rule proposes.
pub enum Candidate<C: RuleContext> {
    /// Always the same action.
    Fixed(C::Action),
    /// Chosen from the context, e.g. a level upgrade or a chain follow-up.
    /// `None` means the rule has nothing to offer this tick.
    Resolved(Box<dyn Fn(&C) -> Option<C::Action> + Send + Sync>),
}

impl<C: RuleContext> Candidate<C> {
    pub fn resolve(&self, ctx: &C) -> Option<C::Action> {
        match self {
            Candidate::Fixed(action) => Some(*action),
            Candidate::Resolved(resolve) => resolve(ctx),
        }
    }
}

/// One row of a priority table. Rank is the entry's position.
pub struct RuleEntry<C: RuleContext> {
    pub name: &'static str,
    pub candidate: Candidate<C>,
    /// Policy flag that must be enabled. `None` means the rule is unconditional.
    pub flag: Option<C::Flag>,
    pub predicate: Box<dyn Predicate<C>>,
    /// Whether the candidate must be usable (level and cooldown) to match.
    pub requires_ready: bool,
}

impl<C: RuleContext + 'static> RuleEntry<C> {
    /// Creates an unflagged, always-eligible rule for a fixed action.
    pub fn new(name: &'static str, action: C::Action) -> Self {
        Self {
            name,
            candidate: Candidate::Fixed(action),
            flag: None,
            predicate: always(),
            requires_ready: true,
        }
    }

    /// Creates a rule whose action is resolved from the context.
    pub fn resolved<F>(name: &'static str, resolve: F) -> Self
    where
        F: Fn(&C) -> Option<C::Action> + Send + Sync + 'static,
    {
        Self {
            name,
            candidate: Candidate::Resolved(Box::new(resolve)),
            flag: None,
            predicate: always(),
            requires_ready: true,
        }
    }

    pub fn flag(mut self, flag: C::Flag) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn when<P>(mut self, predicate: P) -> Self
    where
        P: Predicate<C> + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    /// Skips the usability check; the predicate is responsible for it.
    pub fn unchecked(mut self) -> Self {
        self.requires_ready = false;
        self
    }
}

impl<C: RuleContext> RuleEntry<C> {
    /// Returns the entry's action if it matches in `ctx`.
    ///
    /// Checks run cheapest first: flag, predicate, candidate, usability.
    pub fn matches(&self, ctx: &C) -> Option<C::Action> {
        if let Some(flag) = self.flag
            && !ctx.flag_enabled(flag)
        {
            return None;
        }
        if !self.predicate.holds(ctx) {
            return None;
        }
        let action = self.candidate.resolve(ctx)?;
        if self.requires_ready && !ctx.action_usable(action) {
            return None;
        }
        Some(action)
    }
}

impl<C: RuleContext> fmt::Debug for RuleEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("flag", &self.flag)
            .field("requires_ready", &self.requires_ready)
            .finish_non_exhaustive()
    }
}

/// The winning entry of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection<A> {
    pub action: A,
    /// Zero-based position in the table; lower wins.
    pub rank: usize,
    pub rule: &'static str,
}

/// Ordered rule list for one decision domain.
pub struct RuleTable<C: RuleContext> {
    domain: &'static str,
    entries: Vec<RuleEntry<C>>,
}

impl<C: RuleContext> RuleTable<C> {
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            entries: Vec::new(),
        }
    }

    /// Appends an entry at the lowest priority so far.
    pub fn rule(mut self, entry: RuleEntry<C>) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn entries(&self) -> &[RuleEntry<C>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first matching entry in rank order, or `None`.
    ///
    /// The caller owns the fallback when nothing matches.
    pub fn evaluate(&self, ctx: &C) -> Option<Selection<C::Action>> {
        self.matching(ctx).next()
    }

    /// Every matching entry in rank order.
    pub fn matching<'t>(&'t self, ctx: &'t C) -> impl Iterator<Item = Selection<C::Action>> + 't {
        self.entries
            .iter()
            .enumerate()
            .filter_map(move |(rank, entry)| {
                entry.matches(ctx).map(|action| Selection {
                    action,
                    rank,
                    rule: entry.name,
                })
            })
    }
}

impl<C: RuleContext> fmt::Debug for RuleTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("domain", &self.domain)
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Flag {
        Burst,
        Spender,
        Filler,
    }

    struct TestContext {
        disabled: HashSet<Flag>,
        on_cooldown: HashSet<u32>,
        resource: u8,
    }

    impl TestContext {
        fn new(resource: u8) -> Self {
            Self {
                disabled: HashSet::new(),
                on_cooldown: HashSet::new(),
                resource,
            }
        }
    }

    impl RuleContext for TestContext {
        type Action = u32;
        type Flag = Flag;

        fn flag_enabled(&self, flag: Flag) -> bool {
            !self.disabled.contains(&flag)
        }

        fn action_usable(&self, action: u32) -> bool {
            !self.on_cooldown.contains(&action)
        }
    }

    fn table() -> RuleTable<TestContext> {
        RuleTable::<TestContext>::new("test")
            .rule(RuleEntry::new("burst", 1).flag(Flag::Burst))
            .rule(
                RuleEntry::new("spender", 2)
                    .flag(Flag::Spender)
                    .when(|ctx: &TestContext| ctx.resource > 0),
            )
            .rule(
                RuleEntry::resolved("upgrade", |ctx: &TestContext| {
                    (ctx.resource >= 3).then_some(30)
                })
                .flag(Flag::Filler),
            )
            .rule(RuleEntry::new("filler", 4).unchecked())
    }

    #[test]
    fn first_eligible_entry_wins() {
        let table = table();
        let ctx = TestContext::new(2);

        let selection = table.evaluate(&ctx).unwrap();
        assert_eq!(selection.action, 1);
        assert_eq!(selection.rank, 0);
        assert_eq!(selection.rule, "burst");
    }

    #[test]
    fn disabled_flag_skips_entry() {
        let table = table();
        let mut ctx = TestContext::new(2);
        ctx.disabled.insert(Flag::Burst);

        assert_eq!(table.evaluate(&ctx).map(|s| s.action), Some(2));
    }

    #[test]
    fn unusable_candidate_skips_entry() {
        let table = table();
        let mut ctx = TestContext::new(0);
        ctx.on_cooldown.insert(1);

        assert_eq!(table.evaluate(&ctx).map(|s| s.rule), Some("filler"));
    }

    #[test]
    fn unchecked_entry_ignores_usability() {
        let table = table();
        let mut ctx = TestContext::new(0);
        ctx.on_cooldown.extend([1, 4]);

        assert_eq!(table.evaluate(&ctx).map(|s| s.action), Some(4));
    }

    #[test]
    fn resolved_candidate_can_decline() {
        let table = table();
        let mut ctx = TestContext::new(3);
        ctx.disabled.extend([Flag::Burst, Flag::Spender]);
        assert_eq!(table.evaluate(&ctx).map(|s| s.action), Some(30));

        ctx.resource = 0;
        assert_eq!(table.evaluate(&ctx).map(|s| s.action), Some(4));
    }

    #[test]
    fn no_lower_rank_is_returned_while_a_higher_rank_matches() {
        let table = table();
        for resource in 0..4 {
            for mask in 0u8..8 {
                let mut ctx = TestContext::new(resource);
                for (bit, flag) in [Flag::Burst, Flag::Spender, Flag::Filler].into_iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        ctx.disabled.insert(flag);
                    }
                }
                let first = table.matching(&ctx).next();
                assert_eq!(table.evaluate(&ctx), first);
                if let Some(selection) = first {
                    assert!(
                        table.entries()[..selection.rank]
                            .iter()
                            .all(|entry| entry.matches(&ctx).is_none())
                    );
                }
            }
        }
    }

    #[test]
    fn empty_table_yields_nothing() {
        let table: RuleTable<TestContext> = RuleTable::new("empty");
        assert!(table.is_empty());
        assert_eq!(table.evaluate(&TestContext::new(0)), None);
    }
}
