//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod renderer;
pub mod repository;
pub mod tag_tree;

pub use config::Config;
pub use renderer::render_markdown;
pub use repository::{FileSystemRepository, WorkspaceRepository};
pub use tag_tree::TagTree;
