//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod preview;
pub mod tag_note;

pub use manage_config::ConfigService;
pub use preview::PreviewService;
pub use tag_note::{NoteChange, TagNoteService};
