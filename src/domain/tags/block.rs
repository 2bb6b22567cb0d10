//! Front-matter tag block codec
//!
//! Recognizes a leading block of the shape
//!
//! ```text
//! ---
//! tags: work projects/alpha
//! ---          (or `...`)
//! ```
//!
//! and rewrites only its `tags:` line. Everything outside that line is
//! preserved byte-for-byte.

use crate::domain::settings::TagSettings;
use log::debug;
use std::collections::BTreeSet;
use std::ops::Range;

const OPEN_MARKER: &str = "---";
const TAGS_KEY: &str = "tags:";

/// Marker that terminates an existing block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingMarker {
    /// `---`
    Dashes,
    /// `...`
    Dots,
}

impl ClosingMarker {
    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(ClosingMarker::Dashes),
            "..." => Some(ClosingMarker::Dots),
            _ => None,
        }
    }
}

/// A well-formed tag block found at the start of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    /// Tokens in document order, duplicates included
    pub tokens: Vec<String>,

    /// Byte range from the start of the `tags:` line to the end of the tag list
    pub span: Range<usize>,

    pub closing: ClosingMarker,
}

/// Decoded state of a document's leading front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatter {
    /// No opening marker at the start of the document
    Absent,

    /// Opening marker present, but no recognizable `tags:` line and closer.
    /// `insert_at` is the offset just past the opening marker line; `closed`
    /// records whether any closing marker follows it.
    MissingTags { insert_at: usize, closed: bool },

    /// Well-formed tag block
    Tags(TagBlock),
}

impl FrontMatter {
    /// Tokens currently stored in the document (empty unless well-formed)
    pub fn tokens(&self) -> &[String] {
        match self {
            FrontMatter::Tags(block) => &block.tokens,
            _ => &[],
        }
    }

    pub fn has_block(&self) -> bool {
        matches!(self, FrontMatter::Tags(_))
    }
}

/// One physical line of the document
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    /// Offset just past the line terminator
    end: usize,
    /// Content without `\n` / `\r\n`
    text: &'a str,
}

fn lines_from(text: &str, offset: usize) -> impl Iterator<Item = Line<'_>> {
    let mut start = offset;
    text[offset..].split_inclusive('\n').map(move |raw| {
        let line_start = start;
        start += raw.len();
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Line {
            start: line_start,
            end: start,
            text: content,
        }
    })
}

/// Length of the line terminator that ends right before `offset`
fn terminator_len_before(text: &str, offset: usize) -> usize {
    let before = &text[..offset];
    if before.ends_with("\r\n") {
        2
    } else if before.ends_with('\n') {
        1
    } else {
        0
    }
}

/// Split a raw tag list into tokens
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Locate and decode the tag block at the start of `text`.
pub fn decode(text: &str) -> FrontMatter {
    let offset = text.len() - text.trim_start().len();
    let mut lines = lines_from(text, offset);

    let open = match lines.next() {
        Some(line) if line.text.trim_end() == OPEN_MARKER => line,
        _ => return FrontMatter::Absent,
    };

    let closed =
        lines_from(text, open.end).any(|line| ClosingMarker::from_line(line.text).is_some());
    let missing = FrontMatter::MissingTags {
        insert_at: open.end,
        closed,
    };

    let tags_line = match lines.next() {
        Some(line) if line.text.starts_with(TAGS_KEY) => line,
        _ => return missing,
    };

    let (closer, closing) = match lines.find_map(|line| {
        ClosingMarker::from_line(line.text).map(|marker| (line, marker))
    }) {
        Some(found) => found,
        None => return missing,
    };

    let list_start = tags_line.start + TAGS_KEY.len();
    let list_end = closer.start - terminator_len_before(text, closer.start);
    let tokens = split_tokens(&text[list_start..list_end]);

    FrontMatter::Tags(TagBlock {
        tokens,
        span: tags_line.start..list_end,
        closing,
    })
}

fn tags_line(tokens: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = tokens.iter().map(String::as_str).collect();
    format!("{} {}", TAGS_KEY, joined.join(" "))
}

/// Write `tokens` back into `text`, choosing the rewrite from the decoded state.
pub fn encode(
    text: &str,
    front_matter: &FrontMatter,
    tokens: &BTreeSet<String>,
    settings: &TagSettings,
) -> String {
    let line = tags_line(tokens);

    match front_matter {
        FrontMatter::Absent => {
            debug!("synthesizing a new tag block");
            format!(
                "{}\n{}\n{}\n\n{}",
                OPEN_MARKER,
                line,
                settings.closing_marker(),
                text
            )
        }
        FrontMatter::MissingTags { insert_at, closed } => {
            debug!("inserting tags line into existing front matter");
            let (head, tail) = text.split_at(*insert_at);
            let separator = if head.ends_with('\n') { "" } else { "\n" };
            // Without a closer the inserted line would never decode as a block
            let closer = if *closed {
                String::new()
            } else {
                format!("{}\n", settings.closing_marker())
            };
            format!("{}{}{}\n{}{}", head, separator, line, closer, tail)
        }
        FrontMatter::Tags(block) => {
            debug!("rewriting tags line at {:?}", block.span);
            format!(
                "{}{}{}",
                &text[..block.span.start],
                line,
                &text[block.span.end..]
            )
        }
    }
}
