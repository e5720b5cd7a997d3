use ropey::Rope;
use tower_lsp::lsp_types::Url;

use crate::completion::Language;

#[derive(Debug)]
pub struct EditorDocumentState {
    pub uri: Url,
    pub text: Rope,
    pub version: i32,
    /// Snapshot of the last clean (opened or saved) text, for dirty tracking.
    pub clean_text: Rope,
}

#[derive(Debug)]
pub struct EditorDocument {
    /// Unique identifier for the document, immutable after construction.
    pub id: u32,
    /// Language the document was bound to when it was opened.
    pub language: Language,
    pub state: tokio::sync::RwLock<EditorDocumentState>,
}
