//! Tag hierarchy strings
//!
//! A tag at `animals > big cats > lions` is stored in a note as the single
//! token `animals/big_cats/lions`: segments joined by the configured
//! separator, spaces replaced by underscores. Names that already contain `_`
//! or the separator itself do not survive the round trip.

use crate::domain::settings::TagSettings;
use serde::{Deserialize, Serialize};

/// Host-assigned tag identifier
pub type TagId = u64;

/// A node in the host's tag tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// `None` for root tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TagId>,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>, parent_id: Option<TagId>) -> Self {
        Tag {
            id,
            name: name.into(),
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Ancestor lookup provided by the host
pub trait TagAncestry {
    /// Names of the tag's ancestors, immediate parent first, root last
    fn parent_tag_names(&self, tag: &Tag) -> Vec<String>;
}

/// Get-or-create lookup provided by the host
pub trait TagLookup {
    /// Resolve a root-first breadcrumb path, creating missing segments.
    /// An empty path resolves to the root sentinel, which has an empty name.
    fn tag_for_path(&mut self, path: &[String]) -> Tag;
}

/// Which part of a tag's path to flatten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyScope {
    /// Ancestors followed by the tag itself
    Full,
    /// Ancestors only
    AncestorsOnly,
}

/// Replace spaces with underscores for storage in the tag line
pub fn to_storage_form(hierarchy: &str) -> String {
    hierarchy.replace(' ', "_")
}

/// Replace underscores with spaces for display and lookup
pub fn to_lookup_form(token: &str) -> String {
    token.replace('_', " ")
}

/// Converts between tag paths and hierarchy strings.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyResolver<'a> {
    settings: &'a TagSettings,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(settings: &'a TagSettings) -> Self {
        HierarchyResolver { settings }
    }

    pub fn separator(&self) -> &str {
        &self.settings.hierarchy_separator
    }

    /// Flatten a tag's path into a hierarchy string (display form).
    pub fn hierarchy_string<A>(&self, ancestry: &A, tag: &Tag, scope: HierarchyScope) -> String
    where
        A: TagAncestry + ?Sized,
    {
        if tag.is_root() {
            return match scope {
                HierarchyScope::Full => tag.name.clone(),
                HierarchyScope::AncestorsOnly => String::new(),
            };
        }

        let mut segments = ancestry.parent_tag_names(tag);
        segments.reverse();
        if scope == HierarchyScope::Full {
            segments.push(tag.name.clone());
        }

        segments.join(self.separator())
    }

    /// Hierarchy string in storage form, ready to be written as a token
    pub fn storage_token<A>(&self, ancestry: &A, tag: &Tag, scope: HierarchyScope) -> String
    where
        A: TagAncestry + ?Sized,
    {
        to_storage_form(&self.hierarchy_string(ancestry, tag, scope))
    }

    /// Split a stored token into a breadcrumb path in lookup form.
    pub fn breadcrumb_path(&self, token: &str) -> Vec<String> {
        to_lookup_form(token)
            .split(self.separator())
            .map(str::to_string)
            .collect()
    }

    /// Join breadcrumb segments with the separator.
    pub fn join(&self, segments: &[String]) -> String {
        segments.join(self.separator())
    }
}
