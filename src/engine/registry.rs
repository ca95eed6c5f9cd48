use super::item::{paths_to_items, FileStamp, ListItem, Published};
use super::matcher::ListSnapshot;
use super::names::NameSet;
use super::parser;
use super::traits::NameMatcher;
use crate::config::Config;
use std::fs::{File, Metadata};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a single refresh did with its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Modification time and size matched the published stamp; nothing parsed.
    Unchanged,
    /// The file was parsed and a new set with `names` members was published.
    Reloaded { names: usize },
    /// The file does not exist. The item keeps its last published state.
    Missing,
    /// The file exists but could not be opened. The item keeps its last
    /// published state.
    Unreadable,
}

/// Ordered collection of monitored list files.
///
/// A single reader/writer lock guards every item. Writes are rare (one per
/// changed file per reload interval), so readers only ever contend with a
/// pointer-sized publish. File I/O and parsing happen outside the lock.
#[derive(Debug)]
pub struct ListRegistry {
    items: RwLock<Vec<ListItem>>,
    reload_interval: Duration,
}

impl ListRegistry {
    pub fn new<I, P>(paths: I, reload_interval: Duration) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let items = paths_to_items(paths);
        for item in &items {
            if !item.path().exists() {
                warn!("Name list {} does not exist", item.path().display());
            }
        }

        Self {
            items: RwLock::new(items),
            reload_interval,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.list_paths(), config.reload_interval())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ListItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ListItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn reload_interval(&self) -> Duration {
        self.reload_interval
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.read()
            .iter()
            .map(|item| item.path().to_path_buf())
            .collect()
    }

    /// Current names of the item at `index`.
    pub fn names(&self, index: usize) -> Option<Arc<NameSet>> {
        self.read().get(index).map(ListItem::names)
    }

    /// Path, stamp and names of the item at `index`, captured together.
    pub fn item(&self, index: usize) -> Option<ListItem> {
        self.read().get(index).cloned()
    }

    pub fn items(&self) -> Vec<ListItem> {
        self.read().clone()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot::new(self.read().iter().map(ListItem::names).collect())
    }

    pub fn total_names(&self) -> usize {
        self.read()
            .iter()
            .map(|item| item.published.names.len())
            .sum()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.check(domain).is_some()
    }

    /// Refreshes every item in registration order. Failures are logged and
    /// never stop the remaining items.
    pub fn refresh_all(&self) {
        let mut reloaded = 0;
        let count = self.len();
        for index in 0..count {
            if let Some(RefreshOutcome::Reloaded { .. }) = self.refresh_one(index) {
                reloaded += 1;
            }
        }

        for item in self.items() {
            debug!(">>> {:?}", item);
        }

        info!(
            "Name lists refreshed: {} of {} reloaded, {} names total",
            reloaded,
            count,
            self.total_names()
        );
    }

    /// Re-parses the item at `index` if its file changed since the last
    /// publish. Returns None if there is no such item.
    ///
    /// Change detection only looks at modification time and size; an edit
    /// that keeps both goes unnoticed until one of them changes.
    pub fn refresh_one(&self, index: usize) -> Option<RefreshOutcome> {
        let path = self.read().get(index)?.path().to_path_buf();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{}: {}", path.display(), e);
                return Some(RefreshOutcome::Missing);
            }
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                return Some(RefreshOutcome::Unreadable);
            }
        };

        let meta = file.metadata();
        Some(self.refresh_from(index, &path, file, meta))
    }

    /// Publishes the contents of an already opened list file unless `meta`
    /// shows it unchanged. A failed stat still parses.
    fn refresh_from(
        &self,
        index: usize,
        path: &Path,
        file: File,
        meta: io::Result<Metadata>,
    ) -> RefreshOutcome {
        let stamp = match meta {
            Ok(meta) => {
                let stamp = FileStamp::from_metadata(&meta);
                let current = self.read().get(index).map(ListItem::stamp);
                if current == Some(stamp) {
                    return RefreshOutcome::Unchanged;
                }
                stamp
            }
            Err(e) => {
                // Parse anyway; the unset stamp forces another parse next time.
                warn!("Failed to stat {}: {}", path.display(), e);
                FileStamp::default()
            }
        };

        debug!("Parsing {}", path.display());
        let names = Arc::new(parser::parse(BufReader::new(file)));
        let count = names.len();

        if let Some(item) = self.write().get_mut(index) {
            item.published = Published { stamp, names };
        }

        RefreshOutcome::Reloaded { names: count }
    }
}

impl NameMatcher for ListRegistry {
    fn check(&self, domain: &str) -> Option<usize> {
        self.read()
            .iter()
            .position(|item| item.published.names.contains(domain))
    }
}
