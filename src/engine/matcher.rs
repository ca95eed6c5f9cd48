use super::names::NameSet;
use super::traits::NameMatcher;
use std::sync::Arc;

/// Point-in-time view of every list, taken under a single read lock.
///
/// Lookups never touch the registry lock, and a refresh that publishes new
/// sets afterwards does not change what a snapshot sees.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    lists: Vec<Arc<NameSet>>,
}

impl ListSnapshot {
    pub fn new(lists: Vec<Arc<NameSet>>) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &[Arc<NameSet>] {
        &self.lists
    }

    pub fn total_names(&self) -> usize {
        self.lists.iter().map(|names| names.len()).sum()
    }
}

impl NameMatcher for ListSnapshot {
    fn check(&self, domain: &str) -> Option<usize> {
        self.lists.iter().position(|names| names.contains(domain))
    }
}
