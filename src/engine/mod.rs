mod item;
mod matcher;
mod names;
pub mod parser;
mod registry;
mod traits;

pub use item::{paths_to_items, FileStamp, ListItem};
pub use matcher::ListSnapshot;
pub use names::NameSet;
pub use parser::ListEntry;
pub use registry::{ListRegistry, RefreshOutcome};
pub use traits::NameMatcher;
