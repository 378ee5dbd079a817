//! Configuration synchronization
//!
//! [`merge`] holds the add-only tree merge; [`engine`] wraps it with
//! loading, templating and writing.

pub mod engine;
pub mod merge;

pub use engine::{ConfigSync, DEFAULT_TEMPLATE, INDEX_PAGE, SyncOutcome};
pub use merge::{COLLECTIONS_KEY, MergeSummary, synchronize};
