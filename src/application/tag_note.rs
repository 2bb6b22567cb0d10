//! Tag a single note through its front matter

use crate::domain::tags::{
    HierarchyResolver, TagEvent, TagEventHandler, TagEventOutcome, TagLookup,
};
use crate::domain::TagSettings;
use crate::error::{FmTagsError, Result};
use crate::infrastructure::{FileSystemRepository, TagTree, WorkspaceRepository};
use log::debug;
use std::path::Path;

/// Whether a command rewrote the note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteChange {
    Updated,
    Unchanged,
}

/// Service for add / remove / rename / list on one note
pub struct TagNoteService {
    repository: FileSystemRepository,
}

impl TagNoteService {
    /// Create a new tag note service
    pub fn new(repository: FileSystemRepository) -> Self {
        TagNoteService { repository }
    }

    /// Add the tag at `tag_path` to the note, creating the tag if needed.
    pub fn add(&self, note: &Path, tag_path: &str) -> Result<NoteChange> {
        let settings = self.repository.load_config()?.tags;
        let mut tree = self.repository.load_tag_tree()?;
        let content = self.repository.read_note(note)?;

        let path = parse_tag_path(tag_path, &settings.hierarchy_separator)?;
        let tag = tree.tag_for_path(&path);

        let outcome = TagEventHandler::new(&settings).handle(&content, TagEvent::Add(&tag), &mut tree);
        let change = self.apply(note, outcome)?;
        self.save_if_dirty(&mut tree)?;
        Ok(change)
    }

    /// Remove the tag at `tag_path` from the note. The tag tree is not touched.
    pub fn remove(&self, note: &Path, tag_path: &str) -> Result<NoteChange> {
        let settings = self.repository.load_config()?.tags;
        let tree = self.repository.load_tag_tree()?;
        let content = self.repository.read_note(note)?;

        let path = parse_tag_path(tag_path, &settings.hierarchy_separator)?;

        // Resolve against a scratch copy so removal never creates tags
        let mut scratch = tree.clone();
        let tag = scratch.tag_for_path(&path);

        let outcome =
            TagEventHandler::new(&settings).handle(&content, TagEvent::Remove(&tag), &mut scratch);
        self.apply(note, outcome)
    }

    /// Rename the tag at `tag_path` to `new_name`, in the note and in the tag tree.
    pub fn rename(&self, note: &Path, tag_path: &str, new_name: &str) -> Result<NoteChange> {
        let settings = self.repository.load_config()?.tags;
        let mut tree = self.repository.load_tag_tree()?;
        let content = self.repository.read_note(note)?;

        let separator = &settings.hierarchy_separator;
        let path = parse_tag_path(tag_path, separator)?;
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name.contains(separator.as_str()) {
            return Err(FmTagsError::InvalidTagPath(new_name.to_string()));
        }

        let mut renamed_path = path.clone();
        if let Some(last) = renamed_path.last_mut() {
            *last = new_name.to_string();
        }
        if renamed_path != path && tree.find_by_path(&renamed_path).is_some() {
            return Err(FmTagsError::InvalidTagPath(format!(
                "{} already exists",
                HierarchyResolver::new(&settings).join(&renamed_path)
            )));
        }

        // Resolve against a scratch copy; only a tag the tree already knows is renamed there
        let mut scratch = tree.clone();
        let tag = scratch.tag_for_path(&path);
        let outcome = TagEventHandler::new(&settings).handle(
            &content,
            TagEvent::Rename {
                tag: &tag,
                new_name,
            },
            &mut scratch,
        );
        let change = self.apply(note, outcome)?;

        if let Some(id) = tree.find_by_path(&path).map(|existing| existing.id) {
            tree.rename(id, new_name);
        }
        self.save_if_dirty(&mut tree)?;
        Ok(change)
    }

    /// Tag paths stored in the note, in the order they appear
    pub fn list(&self, note: &Path) -> Result<Vec<Vec<String>>> {
        let settings = self.repository.load_config()?.tags;
        let mut tree = self.repository.load_tag_tree()?;
        let content = self.repository.read_note(note)?;

        let ids = TagEventHandler::new(&settings).list(&content, &mut tree);
        let paths: Vec<Vec<String>> = ids
            .into_iter()
            .filter_map(|id| tree.get(id).map(|tag| tree.path_of(tag)))
            .collect();

        self.save_if_dirty(&mut tree)?;
        Ok(paths)
    }

    /// Settings the service runs with
    pub fn settings(&self) -> Result<TagSettings> {
        Ok(self.repository.load_config()?.tags)
    }

    fn apply(&self, note: &Path, outcome: TagEventOutcome) -> Result<NoteChange> {
        match outcome {
            TagEventOutcome::Rewritten(content) => {
                self.repository.write_note_atomic(note, &content)?;
                Ok(NoteChange::Updated)
            }
            TagEventOutcome::Listed(_) | TagEventOutcome::Unchanged => {
                debug!("{} unchanged", note.display());
                Ok(NoteChange::Unchanged)
            }
        }
    }

    fn save_if_dirty(&self, tree: &mut TagTree) -> Result<()> {
        if tree.is_dirty() {
            self.repository.save_tag_tree(tree)?;
        }
        Ok(())
    }
}

/// Split a user-supplied tag path on the separator.
pub fn parse_tag_path(input: &str, separator: &str) -> Result<Vec<String>> {
    let segments: Vec<String> = input
        .split(separator)
        .map(|segment| segment.trim().to_string())
        .collect();

    if segments
        .iter()
        .any(|s| s.is_empty() || s.contains(|c: char| c.is_whitespace() && c != ' '))
    {
        return Err(FmTagsError::InvalidTagPath(input.to_string()));
    }

    Ok(segments)
}
