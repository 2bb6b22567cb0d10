//! Tag system

pub mod block;
pub mod events;
pub mod hierarchy;

// Re-export main types
pub use block::{ClosingMarker, FrontMatter, TagBlock};
pub use events::{TagEvent, TagEventHandler, TagEventOutcome};
pub use hierarchy::{HierarchyResolver, HierarchyScope, Tag, TagAncestry, TagId, TagLookup};
