use super::names::NameSet;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Staleness key of a list file: modification time and size as last observed.
///
/// The zero value (no timestamp, size 0) never matches a successfully stat'd
/// file on platforms that report modification times, so a fresh item is always
/// parsed on its first refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStamp {
    modified: Option<SystemTime>,
    size: u64,
}

impl FileStamp {
    pub fn new(modified: Option<SystemTime>, size: u64) -> Self {
        Self { modified, size }
    }

    pub fn from_metadata(meta: &Metadata) -> Self {
        Self {
            modified: meta.modified().ok(),
            size: meta.len(),
        }
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Names published for one file together with the stamp of the content they
/// were parsed from. Always replaced as a whole.
#[derive(Debug, Clone, Default)]
pub(crate) struct Published {
    pub(crate) stamp: FileStamp,
    pub(crate) names: Arc<NameSet>,
}

/// Per-file state of the registry.
#[derive(Clone)]
pub struct ListItem {
    path: PathBuf,
    pub(crate) published: Published,
}

impl ListItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            published: Published::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stamp(&self) -> FileStamp {
        self.published.stamp
    }

    pub fn names(&self) -> Arc<NameSet> {
        self.published.names.clone()
    }
}

impl fmt::Debug for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListItem")
            .field("path", &self.path)
            .field("modified", &self.published.stamp.modified)
            .field("size", &self.published.stamp.size)
            .field("names", &self.published.names.len())
            .finish()
    }
}

/// Builds one item per path, in order.
pub fn paths_to_items<I, P>(paths: I) -> Vec<ListItem>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths.into_iter().map(ListItem::new).collect()
}
