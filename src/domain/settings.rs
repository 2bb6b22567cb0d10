//! Tag block settings

use serde::{Deserialize, Serialize};

/// Default separator between hierarchy segments
pub const DEFAULT_SEPARATOR: &str = "/";

/// Settings threaded through the codec, resolver and event handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// Close newly created blocks with `---` instead of `...`
    pub use_three_dash_closing: bool,

    /// Separator used when flattening a tag path into a single token
    pub hierarchy_separator: String,
}

impl TagSettings {
    /// The closing marker written when a block is synthesized
    pub fn closing_marker(&self) -> &'static str {
        if self.use_three_dash_closing {
            "---"
        } else {
            "..."
        }
    }
}

impl Default for TagSettings {
    fn default() -> Self {
        TagSettings {
            use_three_dash_closing: true,
            hierarchy_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
