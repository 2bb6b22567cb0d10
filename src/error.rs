//! Error types for fmtags

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the fmtags host
#[derive(Debug, Error)]
pub enum FmTagsError {
    #[error("Not an fmtags workspace: {0}")]
    NotWorkspace(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid tag path: {0}")]
    InvalidTagPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FmTagsError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FmTagsError::NotWorkspace(_) => 2,
            FmTagsError::NoteNotFound(_) => 3,
            FmTagsError::InvalidTagPath(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            FmTagsError::NotWorkspace(path) => {
                format!(
                    "Not an fmtags workspace: {}\n\n\
                    Suggestions:\n\
                    • Run 'fmtags init' in this directory to create a workspace\n\
                    • Navigate to an existing workspace\n\
                    • Set FMTAGS_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            FmTagsError::InvalidTagPath(path) => {
                format!(
                    "Invalid tag path: '{}'\n\n\
                    Tag paths are names joined by the hierarchy separator:\n\
                    • work\n\
                    • projects/alpha\n\
                    • animals/big cats\n\n\
                    Check the separator with: fmtags config hierarchy_separator",
                    path
                )
            }
            FmTagsError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: fmtags config use_three_dash_closing false",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using FmTagsError
pub type Result<T> = std::result::Result<T, FmTagsError>;
