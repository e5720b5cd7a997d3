//! Property value completion for CSS documents

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::query::CompletionQuery;
use super::result::CompletionOutcome;
use super::vocabulary::css_property_values;

/// A property name, a colon, and an in-progress value token, ending at the
/// cursor. The value part may be empty (cursor right after the colon).
static PROPERTY_VALUE_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w-]+\s*:\s*[\w-]*$").expect("failed to compile property context pattern")
});

/// Leading word-or-hyphen run of the matched context.
static PROPERTY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]+").expect("failed to compile property name pattern"));

/// Trailing word-or-hyphen run of the matched context.
static PARTIAL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w-]*$").expect("failed to compile partial value pattern"));

/// Proposes values from the fixed CSS property table when the cursor sits
/// after a known property name and colon.
#[derive(Debug, Default)]
pub struct PropertyValueResolver;

impl PropertyValueResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve completions at the query's cursor.
    ///
    /// Returns `None` when the cursor is not in value position, the property
    /// is outside the fixed table, or no candidate value starts with the
    /// partial value. Unknown properties are never completed.
    pub fn resolve(&self, query: &CompletionQuery) -> Option<CompletionOutcome> {
        let span = query.match_before(&PROPERTY_VALUE_CONTEXT)?;

        // Extract property name and lookup possible values
        let property = PROPERTY_NAME.find(span.text)?.as_str();
        let values = css_property_values(property)?;

        // Extract the partial value and set the replacement position accordingly
        let partial = PARTIAL_VALUE.find(span.text).map_or("", |found| found.as_str());
        let matching: Vec<&str> = values
            .iter()
            .copied()
            .filter(|value| value.starts_with(partial))
            .collect();
        if matching.is_empty() {
            return None;
        }

        debug!(
            "Property value context at {}: property={:?}, partial={:?}",
            query.cursor(),
            property,
            partial
        );
        let from = query.cursor() - partial.len();
        Some(CompletionOutcome::ranked(from, matching))
    }
}
