//! Persisted tag hierarchy

use crate::domain::tags::{Tag, TagAncestry, TagId, TagLookup};
use crate::error::Result;
use crate::infrastructure::config::WORKSPACE_DIR;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const TAGS_FILE: &str = "tags.toml";

/// Id of the unnamed root every top-level tag hangs off
pub const ROOT_ID: TagId = 0;

/// Host-side tag store, saved to .fmtags/tags.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagTree {
    #[serde(default, rename = "tag")]
    tags: Vec<Tag>,

    #[serde(skip)]
    dirty: bool,
}

impl TagTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the tree from .fmtags/tags.toml (empty if the file is missing)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let tags_path = path.join(WORKSPACE_DIR).join(TAGS_FILE);
        if !tags_path.exists() {
            return Ok(TagTree::new());
        }

        let contents = fs::read_to_string(&tags_path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save the tree to .fmtags/tags.toml
    pub fn save_to_dir(&mut self, path: &Path) -> Result<()> {
        let workspace_dir = path.join(WORKSPACE_DIR);
        if !workspace_dir.exists() {
            fs::create_dir(&workspace_dir)?;
        }

        let contents = toml::to_string_pretty(&*self)?;
        fs::write(workspace_dir.join(TAGS_FILE), contents)?;
        info!("saved {} tag(s)", self.tags.len());

        self.dirty = false;
        Ok(())
    }

    /// Whether tags were created or renamed since the last load/save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn all(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    fn find_child(&self, name: &str, parent_id: Option<TagId>) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|tag| tag.parent_id == parent_id && tag.name == name)
    }

    /// Look up an existing tag by its root-first path
    pub fn find_by_path(&self, path: &[String]) -> Option<&Tag> {
        let mut current: Option<&Tag> = None;
        for segment in path.iter().filter(|s| !s.is_empty()) {
            current = Some(self.find_child(segment, current.map(|tag| tag.id))?);
        }
        current
    }

    /// Names from the root down to `tag` itself
    pub fn path_of(&self, tag: &Tag) -> Vec<String> {
        let mut path = self.parent_tag_names(tag);
        path.reverse();
        path.push(tag.name.clone());
        path
    }

    /// Rename a tag in place. Returns false if the id is unknown.
    pub fn rename(&mut self, id: TagId, new_name: &str) -> bool {
        match self.tags.iter_mut().find(|tag| tag.id == id) {
            Some(tag) => {
                tag.name = new_name.to_string();
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn next_id(&self) -> TagId {
        self.tags.iter().map(|tag| tag.id).max().unwrap_or(ROOT_ID) + 1
    }

    fn create_child(&mut self, name: &str, parent_id: Option<TagId>) -> Tag {
        let tag = Tag::new(self.next_id(), name, parent_id);
        self.tags.push(tag.clone());
        self.dirty = true;
        tag
    }
}

impl TagAncestry for TagTree {
    fn parent_tag_names(&self, tag: &Tag) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = tag.parent_id;

        while let Some(parent) = current.and_then(|id| self.get(id)) {
            // Guard against cycles in a hand-edited tags.toml
            if names.len() > self.tags.len() {
                break;
            }
            names.push(parent.name.clone());
            current = parent.parent_id;
        }

        names
    }
}

impl TagLookup for TagTree {
    fn tag_for_path(&mut self, path: &[String]) -> Tag {
        let mut current = Tag::new(ROOT_ID, "", None);
        let mut parent_id = None;

        for segment in path.iter().filter(|s| !s.is_empty()) {
            current = match self.find_child(segment, parent_id) {
                Some(existing) => existing.clone(),
                None => self.create_child(segment, parent_id),
            };
            parent_id = Some(current.id);
        }

        current
    }
}
