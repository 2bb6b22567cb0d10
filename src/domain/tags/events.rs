//! Tag lifecycle events applied to a note's front matter

use crate::domain::settings::TagSettings;
use crate::domain::tags::block::{self, FrontMatter};
use crate::domain::tags::hierarchy::{
    to_storage_form, HierarchyResolver, HierarchyScope, Tag, TagAncestry, TagId, TagLookup,
};
use log::debug;
use std::collections::BTreeSet;

/// An event raised by the host for one note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEvent<'a> {
    Add(&'a Tag),
    Remove(&'a Tag),
    Rename { tag: &'a Tag, new_name: &'a str },
    List,
}

/// Result of handling a [`TagEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEventOutcome {
    /// Full replacement text for the note
    Rewritten(String),

    /// Tag ids referenced by the note, first-seen order
    Listed(Vec<TagId>),

    /// Nothing to write
    Unchanged,
}

impl TagEventOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, TagEventOutcome::Unchanged)
    }
}

/// Applies tag events to note text.
#[derive(Debug, Clone, Copy)]
pub struct TagEventHandler<'a> {
    settings: &'a TagSettings,
}

impl<'a> TagEventHandler<'a> {
    pub fn new(settings: &'a TagSettings) -> Self {
        TagEventHandler { settings }
    }

    fn resolver(&self) -> HierarchyResolver<'a> {
        HierarchyResolver::new(self.settings)
    }

    pub fn handle<S>(&self, document: &str, event: TagEvent<'_>, store: &mut S) -> TagEventOutcome
    where
        S: TagAncestry + TagLookup + ?Sized,
    {
        match event {
            TagEvent::Add(tag) => self.add(document, tag, &*store),
            TagEvent::Remove(tag) => self.remove(document, tag, &*store),
            TagEvent::Rename { tag, new_name } => self.rename(document, tag, new_name, &*store),
            TagEvent::List => TagEventOutcome::Listed(self.list(document, store)),
        }
    }

    fn add<A>(&self, document: &str, tag: &Tag, ancestry: &A) -> TagEventOutcome
    where
        A: TagAncestry + ?Sized,
    {
        let token = self
            .resolver()
            .storage_token(ancestry, tag, HierarchyScope::Full);
        let front_matter = block::decode(document);
        let mut tokens = token_set(&front_matter);

        if !tokens.insert(token) {
            debug!("tag already present, nothing to add");
            return TagEventOutcome::Unchanged;
        }

        TagEventOutcome::Rewritten(block::encode(
            document,
            &front_matter,
            &tokens,
            self.settings,
        ))
    }

    fn remove<A>(&self, document: &str, tag: &Tag, ancestry: &A) -> TagEventOutcome
    where
        A: TagAncestry + ?Sized,
    {
        let token = self
            .resolver()
            .storage_token(ancestry, tag, HierarchyScope::Full);
        let front_matter = block::decode(document);
        let mut tokens = token_set(&front_matter);

        if !tokens.remove(&token) {
            debug!("tag {} not present, nothing to remove", token);
            return TagEventOutcome::Unchanged;
        }

        TagEventOutcome::Rewritten(block::encode(
            document,
            &front_matter,
            &tokens,
            self.settings,
        ))
    }

    fn rename<A>(&self, document: &str, tag: &Tag, new_name: &str, ancestry: &A) -> TagEventOutcome
    where
        A: TagAncestry + ?Sized,
    {
        if new_name.trim().is_empty() {
            return TagEventOutcome::Unchanged;
        }

        let front_matter = block::decode(document);
        if !front_matter.has_block() {
            return TagEventOutcome::Unchanged;
        }

        let resolver = self.resolver();
        let separator = resolver.separator();
        let old_token = resolver.storage_token(ancestry, tag, HierarchyScope::Full);
        let ancestors = resolver.storage_token(ancestry, tag, HierarchyScope::AncestorsOnly);
        let new_name = to_storage_form(new_name.trim());
        let new_token = if ancestors.is_empty() {
            new_name
        } else {
            format!("{}{}{}", ancestors, separator, new_name)
        };

        let mut renamed = 0usize;
        let tokens: BTreeSet<String> = front_matter
            .tokens()
            .iter()
            .map(|token| match rebase(token, &old_token, &new_token) {
                Some(rewritten) => {
                    renamed += 1;
                    rewritten
                }
                None => token.clone(),
            })
            .collect();

        if renamed == 0 {
            debug!("no token under {}, nothing to rename", old_token);
            return TagEventOutcome::Unchanged;
        }

        debug!("renamed {} token(s) from {} to {}", renamed, old_token, new_token);
        TagEventOutcome::Rewritten(block::encode(
            document,
            &front_matter,
            &tokens,
            self.settings,
        ))
    }

    /// Resolve every stored token to a tag id through the host lookup.
    pub fn list<L>(&self, document: &str, lookup: &mut L) -> Vec<TagId>
    where
        L: TagLookup + ?Sized,
    {
        let resolver = self.resolver();
        let mut ids: Vec<TagId> = Vec::new();

        for token in block::decode(document).tokens() {
            let path = resolver.breadcrumb_path(token);
            let tag = lookup.tag_for_path(&path);
            if tag.name.is_empty() {
                continue;
            }
            if !ids.contains(&tag.id) {
                ids.push(tag.id);
            }
        }

        ids
    }
}

fn token_set(front_matter: &FrontMatter) -> BTreeSet<String> {
    front_matter.tokens().iter().cloned().collect()
}

/// Replace the leading `old` in `token` with `new`. Descendants share the
/// prefix, and so does any sibling whose name merely starts with `old`.
fn rebase(token: &str, old: &str, new: &str) -> Option<String> {
    token
        .strip_prefix(old)
        .map(|rest| format!("{}{}", new, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat vector store: ids are positions + 1, names unique per parent
    #[derive(Default)]
    struct Store {
        tags: Vec<Tag>,
        lookups: usize,
    }

    impl Store {
        fn child(&mut self, name: &str, parent_id: Option<TagId>) -> Tag {
            if let Some(tag) = self
                .tags
                .iter()
                .find(|t| t.name == name && t.parent_id == parent_id)
            {
                return tag.clone();
            }
            let tag = Tag::new(self.tags.len() as TagId + 1, name, parent_id);
            self.tags.push(tag.clone());
            tag
        }

        fn path(&mut self, segments: &[&str]) -> Tag {
            let owned: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
            self.tag_for_path(&owned)
        }
    }

    impl TagAncestry for Store {
        fn parent_tag_names(&self, tag: &Tag) -> Vec<String> {
            let mut names = Vec::new();
            let mut current = tag.parent_id;
            while let Some(id) = current {
                let parent = &self.tags[(id - 1) as usize];
                names.push(parent.name.clone());
                current = parent.parent_id;
            }
            names
        }
    }

    impl TagLookup for Store {
        fn tag_for_path(&mut self, path: &[String]) -> Tag {
            self.lookups += 1;
            let mut current = Tag::new(0, "", None);
            let mut parent = None;
            for segment in path.iter().filter(|s| !s.is_empty()) {
                current = self.child(segment, parent);
                parent = Some(current.id);
            }
            current
        }
    }

    fn dots() -> TagSettings {
        TagSettings {
            use_three_dash_closing: false,
            ..TagSettings::default()
        }
    }

    fn rewritten(outcome: TagEventOutcome) -> String {
        match outcome {
            TagEventOutcome::Rewritten(text) => text,
            other => panic!("Expected rewritten text, got {:?}", other),
        }
    }

    fn tag_line(text: &str) -> Vec<String> {
        block::decode(text).tokens().to_vec()
    }

    #[test]
    fn test_add_to_empty_document() {
        let mut store = Store::default();
        let work = store.path(&["work"]);

        let settings = dots();
        let handler = TagEventHandler::new(&settings);
        let out = rewritten(handler.handle("", TagEvent::Add(&work), &mut store));
        assert_eq!(out, "---\ntags: work\n...\n\n");

        let settings = TagSettings::default();
        let handler = TagEventHandler::new(&settings);
        let out = rewritten(handler.handle("", TagEvent::Add(&work), &mut store));
        assert_eq!(out, "---\ntags: work\n---\n\n");
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let once = rewritten(handler.handle("Body", TagEvent::Add(&work), &mut store));
        let twice = handler.handle(&once, TagEvent::Add(&work), &mut store);
        assert_eq!(twice, TagEventOutcome::Unchanged);
    }

    #[test]
    fn test_add_is_idempotent_on_unclosed_block() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = TagSettings::default();
        let handler = TagEventHandler::new(&settings);

        let once = rewritten(handler.handle("---\nBody", TagEvent::Add(&work), &mut store));
        assert_eq!(once, "---\ntags: work\n---\nBody");

        let twice = handler.handle(&once, TagEvent::Add(&work), &mut store);
        assert_eq!(twice, TagEventOutcome::Unchanged);
    }

    #[test]
    fn test_add_nested_tag_keeps_sorted() {
        let mut store = Store::default();
        let dogs = store.path(&["animals", "big dogs"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: zoo alpha\n---\n\nBody";
        let out = rewritten(handler.handle(doc, TagEvent::Add(&dogs), &mut store));
        assert_eq!(out, "---\ntags: alpha animals/big_dogs zoo\n---\n\nBody");
    }

    #[test]
    fn test_add_into_front_matter_without_tags() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntitle: Plan\n---\nBody";
        let out = rewritten(handler.handle(doc, TagEvent::Add(&work), &mut store));
        assert_eq!(out, "---\ntags: work\ntitle: Plan\n---\nBody");
    }

    #[test]
    fn test_remove_last_tag_keeps_block() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: work\n...\n\nBody";
        let out = rewritten(handler.handle(doc, TagEvent::Remove(&work), &mut store));
        assert_eq!(out, "---\ntags: \n...\n\nBody");
    }

    #[test]
    fn test_remove_absent_tag_is_noop() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let outcome = handler.handle("---\ntags: home\n---\n", TagEvent::Remove(&work), &mut store);
        assert!(outcome.is_unchanged());

        let outcome = handler.handle("No block", TagEvent::Remove(&work), &mut store);
        assert!(outcome.is_unchanged());
    }

    #[test]
    fn test_remove_collapses_duplicates() {
        let mut store = Store::default();
        let a = store.path(&["a"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: c a b c\n---\n";
        let out = rewritten(handler.handle(doc, TagEvent::Remove(&a), &mut store));
        assert_eq!(out, "---\ntags: b c\n---\n");
    }

    #[test]
    fn test_rename_rewrites_descendants() {
        let mut store = Store::default();
        let mammals = store.path(&["animals", "mammals"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: animals/mammals/dogs animals/mammals birds\n---\n\nBody";
        let out = rewritten(handler.handle(
            doc,
            TagEvent::Rename {
                tag: &mammals,
                new_name: "felines",
            },
            &mut store,
        ));
        assert_eq!(
            tag_line(&out),
            vec!["animals/felines", "animals/felines/dogs", "birds"]
        );
        assert!(out.ends_with("\n---\n\nBody"));
    }

    #[test]
    fn test_rename_root_tag() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: work work/q1 home\n---\n";
        let out = rewritten(handler.handle(
            doc,
            TagEvent::Rename {
                tag: &work,
                new_name: "day job",
            },
            &mut store,
        ));
        assert_eq!(out, "---\ntags: day_job day_job/q1 home\n---\n");
    }

    #[test]
    fn test_rename_rewrites_every_token_with_the_prefix() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = TagSettings::default();
        let handler = TagEventHandler::new(&settings);

        let rename = TagEvent::Rename {
            tag: &work,
            new_name: "job",
        };
        let doc = "---\ntags: work workshop\n---\n";
        let out = rewritten(handler.handle(doc, rename, &mut store));
        assert_eq!(out, "---\ntags: job jobshop\n---\n");
    }

    #[test]
    fn test_rename_without_match_is_noop() {
        let mut store = Store::default();
        let work = store.path(&["work"]);
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let rename = TagEvent::Rename {
            tag: &work,
            new_name: "job",
        };
        assert!(handler
            .handle("---\ntags: home\n---\n", rename, &mut store)
            .is_unchanged());
        assert!(handler.handle("work", rename, &mut store).is_unchanged());

        let empty = TagEvent::Rename {
            tag: &work,
            new_name: "  ",
        };
        assert!(handler
            .handle("---\ntags: work\n---\n", empty, &mut store)
            .is_unchanged());
    }

    #[test]
    fn test_list_resolves_and_deduplicates() {
        let mut store = Store::default();
        let settings = dots();
        let handler = TagEventHandler::new(&settings);

        let doc = "---\ntags: a/b home a/b big_cats\n---\n";
        let ids = match handler.handle(doc, TagEvent::List, &mut store) {
            TagEventOutcome::Listed(ids) => ids,
            other => panic!("Expected ids, got {:?}", other),
        };

        let ab = store.path(&["a", "b"]);
        let home = store.path(&["home"]);
        let cats = store.path(&["big cats"]);
        assert_eq!(ids, vec![ab.id, home.id, cats.id]);
    }

    #[test]
    fn test_list_skips_empty_names() {
        let mut store = Store::default();
        let settings = TagSettings::default();
        let handler = TagEventHandler::new(&settings);

        // A lone separator resolves to the unnamed root
        let ids = handler.list("---\ntags: / work\n---\n", &mut store);
        let work = store.path(&["work"]);
        assert_eq!(ids, vec![work.id]);
    }

    #[test]
    fn test_list_without_block() {
        let mut store = Store::default();
        let settings = TagSettings::default();
        let handler = TagEventHandler::new(&settings);

        assert!(handler.list("Body", &mut store).is_empty());
        assert_eq!(store.lookups, 0);
    }
}
