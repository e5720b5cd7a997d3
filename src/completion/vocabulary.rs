//! Candidate vocabularies
//!
//! Two sources of truth feed the resolvers:
//! - the HTML tag vocabulary, an ordered tag list the host may replace
//!   wholesale at any time
//! - the CSS property table, a fixed mapping from property name to candidate
//!   values, immutable for the lifetime of the process
//!
//! In both, declared order encodes preference: earlier entries rank higher.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Seed tag set used until the host supplies its own.
pub const DEFAULT_HTML_TAGS: &[&str] = &["div", "span"];

/// Ordered, host-replaceable set of well known HTML tag names.
///
/// Replacement swaps the whole list atomically: a resolution call takes one
/// snapshot up front and filters against it, so it observes either the old
/// list or the new one, never a mix.
#[derive(Debug)]
pub struct HtmlVocabulary {
    tags: RwLock<Arc<Vec<String>>>,
}

impl HtmlVocabulary {
    /// Create a vocabulary seeded with [`DEFAULT_HTML_TAGS`].
    pub fn new() -> Self {
        Self::from_tags(DEFAULT_HTML_TAGS.iter().map(|tag| tag.to_string()).collect())
    }

    pub fn from_tags(tags: Vec<String>) -> Self {
        Self {
            tags: RwLock::new(Arc::new(tags)),
        }
    }

    /// Replace the tag list wholesale. Takes effect for all subsequent
    /// resolutions; in-flight resolutions keep the snapshot they started with.
    pub fn replace(&self, tags: Vec<String>) {
        *self.tags.write() = Arc::new(tags);
    }

    /// A consistent snapshot of the current tag list.
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.tags.read())
    }
}

impl Default for HtmlVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Well known CSS properties and their candidate values, ordered from likely
/// usage to less likely usage.
static CSS_PROPERTY_VALUES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "display",
        vec!["block", "inline-block", "flex", "inline-flex", "grid", "inline-grid", "none"],
    );
    table.insert("box-sizing", vec!["border-box", "content-box"]);
    table.insert(
        "position",
        vec!["absolute", "relative", "static", "fixed", "sticky"],
    );
    table.insert(
        "flex-direction",
        vec!["row", "column", "row-reverse", "column-reverse"],
    );
    table.insert("flex-wrap", vec!["nowrap", "wrap", "wrap-reverse"]);
    table.insert(
        "justify-content",
        vec![
            "flex-start", "flex-end", "center", "space-between", "space-around",
            "space-evenly", "stretch", "start", "end", "left", "right", "normal",
        ],
    );
    table.insert(
        "align-items",
        vec![
            "stretch", "flex-start", "flex-end", "center", "baseline", "start", "end",
            "self-start", "self-end", "anchor-center", "normal",
        ],
    );
    table.insert(
        "align-content",
        vec![
            "flex-start", "flex-end", "center", "space-between", "space-around",
            "space-evenly", "stretch", "start", "end", "baseline", "normal",
        ],
    );
    table.insert(
        "align-self",
        vec![
            "flex-start", "flex-end", "center", "stretch", "anchor-stretch",
            "baseline", "normal",
        ],
    );
    table.insert(
        "float",
        vec!["left", "right", "none", "inline-start", "inline-end"],
    );
    table.insert("overflow", vec!["scroll", "hidden", "visible", "clip", "auto"]);
    table.insert("overflow-x", vec!["scroll", "hidden", "visible", "clip", "auto"]);
    table.insert("overflow-y", vec!["scroll", "hidden", "visible", "clip", "auto"]);
    table.insert(
        "text-transform",
        vec!["none", "capitalize", "uppercase", "lowercase", "full-width", "full-size-kana"],
    );
    table.insert(
        "cursor",
        vec![
            "auto", "default", "none", "context-menu", "help", "pointer", "progress",
            "wait", "cell", "crosshair", "text", "vertical-text", "alias", "copy",
            "move", "no-drop", "not-allowed", "grab", "grabbing", "all-scroll",
            "col-resize", "row-resize", "n-resize", "e-resize", "s-resize", "w-resize",
            "ne-resize", "nw-resize", "se-resize", "sw-resize", "ew-resize", "ns-resize",
            "nesw-resize", "nwse-resize", "zoom-in", "zoom-out",
        ],
    );
    table.insert("pointer-events", vec!["auto", "none"]);
    table
});

/// Candidate values for a CSS property, or `None` for properties outside the
/// fixed table. Lookup is exact and case-sensitive.
pub fn css_property_values(property: &str) -> Option<&'static [&'static str]> {
    CSS_PROPERTY_VALUES.get(property).map(|values| values.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let vocabulary = HtmlVocabulary::new();
        assert_eq!(*vocabulary.snapshot(), vec!["div".to_string(), "span".to_string()]);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let vocabulary = HtmlVocabulary::new();
        vocabulary.replace(vec!["article".to_string()]);
        assert_eq!(*vocabulary.snapshot(), vec!["article".to_string()]);
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let vocabulary = HtmlVocabulary::new();
        let snapshot = vocabulary.snapshot();
        vocabulary.replace(Vec::new());
        assert_eq!(snapshot.len(), 2);
        assert!(vocabulary.snapshot().is_empty());
    }

    #[test]
    fn test_css_lookup_is_exact() {
        assert!(css_property_values("display").is_some());
        assert!(css_property_values("Display").is_none());
        assert!(css_property_values("unknown-prop").is_none());
    }

    #[test]
    fn test_css_value_order_is_preserved() {
        let values = css_property_values("display").unwrap();
        assert_eq!(
            values,
            ["block", "inline-block", "flex", "inline-flex", "grid", "inline-grid", "none"]
        );
    }
}
