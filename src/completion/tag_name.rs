//! Tag name completion for HTML documents

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::query::CompletionQuery;
use super::result::CompletionOutcome;
use super::vocabulary::HtmlVocabulary;

/// An open angle bracket followed by an in-progress tag name, ending at the
/// cursor. The name part may be empty (cursor right after `<`).
static TAG_OPEN_CONTEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[\w-]*$").expect("failed to compile tag context pattern"));

/// Proposes tag names from the HTML vocabulary when the cursor sits inside an
/// in-progress tag open.
#[derive(Debug)]
pub struct TagNameResolver {
    vocabulary: Arc<HtmlVocabulary>,
}

impl TagNameResolver {
    pub fn new(vocabulary: Arc<HtmlVocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Resolve completions at the query's cursor.
    ///
    /// Returns `None` when the cursor is not in tag name position or no tag
    /// in the vocabulary starts with the partial name. Accepted candidates
    /// replace only the partial name, not the leading `<`.
    pub fn resolve(&self, query: &CompletionQuery) -> Option<CompletionOutcome> {
        let span = query.match_before(&TAG_OPEN_CONTEXT)?;

        // Strip the leading "<" to get the partial tag name
        let partial = &span.text[1..];

        let tags = self.vocabulary.snapshot();
        let matching: Vec<&str> = tags
            .iter()
            .map(String::as_str)
            .filter(|tag| tag.starts_with(partial))
            .collect();
        if matching.is_empty() {
            return None;
        }

        debug!("Tag name context at {}: partial={:?}", query.cursor(), partial);
        let from = query.cursor() - partial.len();
        Some(CompletionOutcome::ranked(from, matching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::result::CompletionCandidate;

    fn resolver_with(tags: &[&str]) -> TagNameResolver {
        TagNameResolver::new(Arc::new(HtmlVocabulary::from_tags(
            tags.iter().map(|tag| tag.to_string()).collect(),
        )))
    }

    #[test]
    fn test_partial_tag_name() {
        let resolver = resolver_with(&["div", "span"]);
        let query = CompletionQuery::new("<d", 2);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(outcome.from, 1);
        assert_eq!(outcome.candidates, vec![CompletionCandidate::value("div", 99)]);
    }

    #[test]
    fn test_bare_angle_bracket_proposes_everything() {
        let resolver = resolver_with(&["div", "span"]);
        let query = CompletionQuery::new("<", 1);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(outcome.from, 1);
        assert_eq!(
            outcome.candidates,
            vec![
                CompletionCandidate::value("div", 99),
                CompletionCandidate::value("span", 98),
            ]
        );
    }

    #[test]
    fn test_prefix_filter_is_exact() {
        let resolver = resolver_with(&["abbr", "abcdef"]);
        let query = CompletionQuery::new("<abc", 4);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(outcome.from, 1);
        assert_eq!(outcome.candidates, vec![CompletionCandidate::value("abcdef", 99)]);
    }

    #[test]
    fn test_vocabulary_order_decides_rank() {
        let resolver = resolver_with(&["section", "select", "span"]);
        let query = CompletionQuery::new("<se", 3);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(
            outcome.candidates,
            vec![
                CompletionCandidate::value("section", 99),
                CompletionCandidate::value("select", 98),
            ]
        );
    }

    #[test]
    fn test_no_bracket_before_cursor() {
        let resolver = resolver_with(&["div", "span"]);
        let query = CompletionQuery::new("plain text", 5);
        assert!(resolver.resolve(&query).is_none());
    }

    #[test]
    fn test_no_matching_tag() {
        let resolver = resolver_with(&["div", "span"]);
        let query = CompletionQuery::new("<x", 2);
        assert!(resolver.resolve(&query).is_none());
    }

    #[test]
    fn test_empty_vocabulary_never_matches() {
        let resolver = resolver_with(&[]);
        let query = CompletionQuery::new("<", 1);
        assert!(resolver.resolve(&query).is_none());
    }

    #[test]
    fn test_closing_tag_gets_no_special_handling() {
        // "</di" matches the same context as "<di"; the slash sits outside
        // the matched span and the replacement covers only "di".
        let resolver = resolver_with(&["div", "span"]);
        let query = CompletionQuery::new("</di", 4);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(outcome.from, 2);
        assert_eq!(outcome.candidates, vec![CompletionCandidate::value("div", 99)]);
    }

    #[test]
    fn test_mid_document_cursor() {
        let resolver = resolver_with(&["div", "span"]);
        let text = "<p>before</p>\n<sp and after";
        let cursor = 17; // right after "<sp"
        let query = CompletionQuery::new(text, cursor);
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(outcome.from, 15);
        assert_eq!(outcome.candidates, vec![CompletionCandidate::value("span", 99)]);
    }

    #[test]
    fn test_replacement_spans_only_partial_name() {
        let resolver = resolver_with(&["div"]);
        let text = "text <di";
        let query = CompletionQuery::new(text, text.len());
        let outcome = resolver.resolve(&query).unwrap();
        assert_eq!(&text[outcome.from..], "di");
    }
}
