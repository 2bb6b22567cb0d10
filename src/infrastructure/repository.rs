//! File system repository

use crate::error::{FmTagsError, Result};
use crate::infrastructure::config::WORKSPACE_DIR;
use crate::infrastructure::{Config, TagTree};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that pins the workspace root
pub const ROOT_ENV: &str = "FMTAGS_ROOT";

/// Abstract repository for workspace metadata
pub trait WorkspaceRepository {
    /// Get the root directory of this workspace
    fn root(&self) -> &Path;

    /// Load configuration from .fmtags/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .fmtags/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Load the tag tree from .fmtags/tags.toml
    fn load_tag_tree(&self) -> Result<TagTree>;

    /// Save the tag tree to .fmtags/tags.toml
    fn save_tag_tree(&self, tree: &mut TagTree) -> Result<()>;

    /// Check if .fmtags directory exists
    fn is_initialized(&self) -> bool;

    /// Create .fmtags directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of WorkspaceRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the workspace root by walking up from the current directory.
    /// FMTAGS_ROOT takes precedence when set.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(FmTagsError::Config(format!(
                    "{} is set to '{}' but no {} directory found. \
                    Run 'fmtags init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    WORKSPACE_DIR,
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the workspace root by walking up from a specific directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(FmTagsError::NotWorkspace(start.to_path_buf())),
            }
        }
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }
}

impl WorkspaceRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn load_tag_tree(&self) -> Result<TagTree> {
        TagTree::load_from_dir(&self.root)
    }

    fn save_tag_tree(&self, tree: &mut TagTree) -> Result<()> {
        tree.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(FmTagsError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&workspace_dir)?;
        Ok(())
    }
}

// Note operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Resolve a note path against the workspace root (absolute paths pass through)
    pub fn note_path(&self, note: &Path) -> PathBuf {
        self.root.join(note)
    }

    /// Read the full text of a note
    pub fn read_note(&self, note: &Path) -> Result<String> {
        let path = self.note_path(note);

        if !path.is_file() {
            return Err(FmTagsError::NoteNotFound(path));
        }

        fs::read_to_string(&path).map_err(FmTagsError::Io)
    }

    /// Write note content using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    pub fn write_note_atomic(&self, note: &Path, content: &str) -> Result<()> {
        let path = self.note_path(note);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.fmtags-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("note.md"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
