//! Per-role rule table cache.
//!
//! Tables are built on first use and kept until explicitly invalidated. The
//! cache is owned by the long-lived [`crate::Engine`], never a process-wide
//! static, so two engines never share (or race on) their tables.

use std::collections::HashMap;

use combat_core::Job;
use tracing::debug;

use super::{Domain, GnbTable, Role, gnb};

/// One role's domain tables in precedence order.
#[derive(Debug)]
pub struct RoleTables {
    role: Role,
    domains: Vec<(Domain, GnbTable)>,
}

impl RoleTables {
    pub fn build(role: Role) -> Self {
        let tables = match role.job {
            Job::Gunbreaker => gnb::tables(role.mode),
        };
        let domains = tables
            .into_iter()
            .filter_map(|table| Domain::from_name(table.domain()).map(|domain| (domain, table)))
            .collect();
        Self { role, domains }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn domains(&self) -> impl Iterator<Item = (Domain, &GnbTable)> {
        self.domains.iter().map(|(domain, table)| (*domain, table))
    }

    pub fn table(&self, domain: Domain) -> Option<&GnbTable> {
        self.domains
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, table)| table)
    }
}

#[derive(Debug, Default)]
pub struct RuleCache {
    tables: HashMap<Role, RoleTables>,
    builds: u64,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the role's tables, building them on first use.
    pub fn tables(&mut self, role: Role) -> &RoleTables {
        let builds = &mut self.builds;
        self.tables.entry(role).or_insert_with(|| {
            *builds += 1;
            debug!("Building rule tables for {:?}", role);
            RoleTables::build(role)
        })
    }

    /// Drops cached tables, for one job or for all of them.
    ///
    /// Call this whenever job content changes; the next lookup rebuilds.
    pub fn invalidate(&mut self, job: Option<Job>) {
        match job {
            Some(job) => self.tables.retain(|role, _| role.job != job),
            None => self.tables.clear(),
        }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.tables.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// How many times tables were built since the cache was created.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
