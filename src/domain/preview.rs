//! Removes the rendered tag block from a note preview

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

/// Closing `...` rendered on its own line
const DOTS_LINE: &str = "\n...\n";

/// Closing `...` folded into the tag paragraph
const DOTS_PARAGRAPH: &str = "\n...</p>";

/// `---` closing renders the tag line as a setext heading under a rule
fn rule_heading_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)<hr\s*/?>.*?</h2>").unwrap())
}

/// Strip the front-matter block from `html` rendered from `document`.
///
/// Returns `html` unchanged when the document has no block or when none of
/// the known renderings is found.
///
/// The `...` markers are searched across the whole html, so a `---`-closed
/// note with a later line of just `...` (inside a code block, say) loses
/// everything up to that line.
pub fn strip_preview(document: &str, html: &str) -> String {
    if !document.starts_with("---\n") {
        return html.to_string();
    }

    for marker in [DOTS_LINE, DOTS_PARAGRAPH] {
        if let Some(pos) = html.find(marker) {
            debug!("stripping preview up to {:?}", marker);
            return html[pos + marker.len()..].to_string();
        }
    }

    if let Some(found) = rule_heading_regex().find(html) {
        debug!("stripping rendered rule and heading");
        let mut stripped = String::with_capacity(html.len() - found.len());
        stripped.push_str(&html[..found.start()]);
        stripped.push_str(&html[found.end()..]);
        return stripped;
    }

    html.to_string()
}
