//! Completion result types
//!
//! A resolver produces either `None` (no suggestion) or a
//! [`CompletionOutcome`]: the byte offset where accepted candidates replace
//! text, plus the ordered candidate list. Both outcomes are normal; there is
//! no error path.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

/// Kind tag carried by every candidate, for tag names and property values alike.
pub const KIND_VALUE: &str = "value";

/// A single completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Text shown to the user and inserted on acceptance.
    pub label: String,
    /// Fixed kind tag ([`KIND_VALUE`]).
    pub kind: &'static str,
    /// Ordering hint. Higher ranks are shown first; values may go negative
    /// for very long vocabularies, only relative order matters.
    pub rank: i32,
}

impl CompletionCandidate {
    pub fn value(label: impl Into<String>, rank: i32) -> Self {
        Self {
            label: label.into(),
            kind: KIND_VALUE,
            rank,
        }
    }

    /// Convert to an LSP completion item.
    ///
    /// `sort_order` is the candidate's position in the outcome list; clients
    /// sort by `sort_text`, so lower positions surface first.
    pub fn to_completion_item(&self, sort_order: usize) -> CompletionItem {
        CompletionItem {
            label: self.label.clone(),
            kind: Some(CompletionItemKind::VALUE),
            sort_text: Some(format!("{:04}", sort_order)),
            ..Default::default()
        }
    }
}

/// A well-formed completion result.
///
/// Invariant: `from <= cursor`, and every candidate label starts with the
/// partial token found between `from` and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Byte offset where the replacement span begins. Accepting a candidate
    /// overwrites the text between `from` and the cursor.
    pub from: usize,
    /// Candidates in descending rank order.
    pub candidates: Vec<CompletionCandidate>,
}

impl CompletionOutcome {
    /// Build an outcome from labels in preference order, assigning rank
    /// `99 - index` so the first label ranks highest.
    pub fn ranked<I, S>(from: usize, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from,
            candidates: labels
                .into_iter()
                .enumerate()
                .map(|(index, label)| CompletionCandidate::value(label, 99 - index as i32))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_assigns_descending_ranks() {
        let outcome = CompletionOutcome::ranked(3, ["flex", "inline-flex"]);
        assert_eq!(outcome.from, 3);
        assert_eq!(
            outcome.candidates,
            vec![
                CompletionCandidate::value("flex", 99),
                CompletionCandidate::value("inline-flex", 98),
            ]
        );
    }

    #[test]
    fn test_candidate_kind_is_fixed() {
        let candidate = CompletionCandidate::value("div", 99);
        assert_eq!(candidate.kind, KIND_VALUE);
    }

    #[test]
    fn test_to_completion_item() {
        let item = CompletionCandidate::value("block", 99).to_completion_item(0);
        assert_eq!(item.label, "block");
        assert_eq!(item.kind, Some(CompletionItemKind::VALUE));
        assert_eq!(item.sort_text.as_deref(), Some("0000"));
    }
}
