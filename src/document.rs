use ropey::Rope;
use thiserror::Error;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};
use tracing::error;

use crate::completion::Language;

pub use crate::models::{EditorDocument, EditorDocumentState};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid change range: {start}..{end} (document has {len} chars)")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Convert an LSP position to a char offset. Positions past the end of a
/// line or the document clamp to the nearest valid offset.
pub fn lsp_position_to_char(position: &Position, text: &Rope) -> usize {
    let line = (position.line as usize).min(text.len_lines().saturating_sub(1));
    let line_start = text.line_to_char(line);
    let line_len = text.line(line).len_chars();
    line_start + (position.character as usize).min(line_len)
}

/// Convert a char offset back to an LSP position.
pub fn char_to_lsp_position(char_idx: usize, text: &Rope) -> Position {
    let char_idx = char_idx.min(text.len_chars());
    let line = text.char_to_line(char_idx);
    Position {
        line: line as u32,
        character: (char_idx - text.line_to_char(line)) as u32,
    }
}

impl EditorDocumentState {
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), DocumentError> {
        for change in &changes {
            if let Some(range) = change.range {
                let start = lsp_position_to_char(&range.start, &self.text);
                let end = lsp_position_to_char(&range.end, &self.text);
                if start > end || end > self.text.len_chars() {
                    return Err(DocumentError::InvalidRange {
                        start,
                        end,
                        len: self.text.len_chars(),
                    });
                }
                self.text.remove(start..end);
                self.text.insert(start, &change.text);
            } else {
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(())
    }
}

impl EditorDocument {
    pub fn new(id: u32, language: Language, uri: Url, text: &str, version: i32) -> Self {
        let rope = Rope::from_str(text);
        Self {
            id,
            language,
            state: tokio::sync::RwLock::new(EditorDocumentState {
                uri,
                clean_text: rope.clone(),
                text: rope,
                version,
            }),
        }
    }

    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<String> {
        let mut state = self.state.write().await;
        match state.apply(changes, version) {
            Ok(()) => Some(state.text.to_string()),
            Err(e) => {
                error!("Failed to apply changes: {}", e);
                None
            }
        }
    }

    /// Whether the text differs from the last clean snapshot.
    pub async fn is_dirty(&self) -> bool {
        let state = self.state.read().await;
        state.text != state.clean_text
    }

    /// Take the current text as the clean snapshot.
    pub async fn mark_clean(&self) {
        let mut state = self.state.write().await;
        state.clean_text = state.text.clone();
    }

    /// Restore the clean snapshot, discarding unsaved edits. Returns the
    /// restored text.
    pub async fn revert(&self) -> String {
        let mut state = self.state.write().await;
        state.text = state.clean_text.clone();
        state.text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn create_test_document(uri: &str, text: &str) -> EditorDocument {
        EditorDocument::new(1, Language::Html, Url::parse(uri).unwrap(), text, 0)
    }

    #[tokio::test]
    async fn test_apply_full_change() {
        let doc = create_test_document("file:///test.html", "initial text");
        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        }];

        let result = doc.apply(changes, 1).await;
        assert_eq!(result.as_deref(), Some("new text"));
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_apply_incremental_change() {
        let doc = create_test_document("file:///test.html", "hello world");
        let changes = vec![TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position { line: 0, character: 6 },
                end: Position { line: 0, character: 11 },
            }),
            range_length: None,
            text: "there".to_string(),
        }];

        let result = doc.apply(changes, 1).await;
        assert_eq!(result.as_deref(), Some("hello there"));
    }

    #[tokio::test]
    async fn test_dirty_tracking() {
        let doc = create_test_document("file:///test.html", "<div></div>");
        assert!(!doc.is_dirty().await);

        doc.apply(
            vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "<span></span>".to_string(),
            }],
            1,
        )
        .await;
        assert!(doc.is_dirty().await);

        doc.mark_clean().await;
        assert!(!doc.is_dirty().await);
    }

    #[tokio::test]
    async fn test_revert_restores_clean_snapshot() {
        let doc = create_test_document("file:///test.css", "a { display: flex }");
        doc.apply(
            vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "broken".to_string(),
            }],
            1,
        )
        .await;

        let restored = doc.revert().await;
        assert_eq!(restored, "a { display: flex }");
        assert!(!doc.is_dirty().await);
    }

    #[test]
    fn test_position_conversion_round_trip() {
        let text = Rope::from_str("first line\nsecond line\n");
        let position = Position { line: 1, character: 4 };
        let char_idx = lsp_position_to_char(&position, &text);
        assert_eq!(char_to_lsp_position(char_idx, &text), position);
    }

    #[test]
    fn test_position_past_line_end_clamps() {
        let text = Rope::from_str("ab\ncd");
        let position = Position { line: 0, character: 99 };
        // Clamps to the end of line 0, which includes its newline.
        assert_eq!(lsp_position_to_char(&position, &text), 3);
    }

    #[test]
    fn test_position_past_document_clamps() {
        let text = Rope::from_str("ab");
        let position = Position { line: 9, character: 9 };
        assert_eq!(lsp_position_to_char(&position, &text), 2);
    }
}
