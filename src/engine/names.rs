use rustc_hash::FxHashSet;
use std::borrow::Cow;

/// Deduplicated set of lowercase domain names without the trailing root dot.
///
/// Members are only added by the line parser after they pass
/// [`crate::domain::is_domain_name`]. Once published by the registry a set is
/// shared behind an `Arc` and never mutated again.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameSet {
    names: FxHashSet<Box<str>>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already validated, lowercased name. Returns true if the name
    /// was newly inserted, false if it was already present.
    pub(crate) fn insert(&mut self, name: &str) -> bool {
        let name = name.strip_suffix('.').unwrap_or(name);
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.into())
    }

    /// Exact membership test, ignoring ASCII case and one trailing dot.
    pub fn contains(&self, domain: &str) -> bool {
        self.names.contains(&*normalize(domain))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.as_ref())
    }
}

fn normalize(domain: &str) -> Cow<'_, str> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(domain.to_ascii_lowercase())
    } else {
        Cow::Borrowed(domain)
    }
}
