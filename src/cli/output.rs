//! Output formatting utilities

use crate::application::NoteChange;
use std::path::Path;

/// Format the tags stored in a note for display.
pub fn format_tag_list(paths: &[Vec<String>], separator: &str) -> String {
    if paths.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for path in paths {
        output.push_str(&format!("#{}\n", path.join(separator)));
    }

    output
}

/// Format the result of a mutating command.
pub fn format_note_change(note: &Path, change: NoteChange) -> String {
    match change {
        NoteChange::Updated => format!("Updated {}", note.display()),
        NoteChange::Unchanged => format!("No change to {}", note.display()),
    }
}
