//! fmtags - Note tags stored in YAML front matter
//!
//! Keeps a note's tags on a single `tags:` line inside a leading `---` block,
//! applies add / remove / rename / list events to that line, and strips the
//! block from rendered previews.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::FmTagsError;
