//! Preview a note without its tag block

use crate::domain::strip_preview;
use crate::error::Result;
use crate::infrastructure::{render_markdown, FileSystemRepository};
use std::path::Path;

/// Service for rendering note previews
pub struct PreviewService {
    repository: FileSystemRepository,
}

impl PreviewService {
    /// Create a new preview service
    pub fn new(repository: FileSystemRepository) -> Self {
        PreviewService { repository }
    }

    /// Render the note to HTML and drop the front-matter block
    pub fn execute(&self, note: &Path) -> Result<String> {
        let content = self.repository.read_note(note)?;
        let html = render_markdown(&content);
        Ok(strip_preview(&content, &html))
    }
}
