use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Deserialize;
use tokio::sync::RwLock;

use tower_lsp::{Client, LanguageServer, jsonrpc};
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, CompletionTextEdit,
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, InitializedParams, InitializeParams,
    InitializeResult, MessageType, Position, Range, ServerCapabilities,
    TextDocumentSyncCapability, TextDocumentSyncKind, TextEdit, Url,
};

use tracing::{debug, error, info, warn};

use crate::completion::{CompletionDispatch, CompletionQuery, Language};
use crate::document::{char_to_lsp_position, lsp_position_to_char, EditorDocument};

/// Host-pushed settings accepted over `workspace/didChangeConfiguration`.
#[derive(Debug, Deserialize)]
struct Settings {
    html: Option<HtmlSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HtmlSettings {
    /// Replacement for the whole HTML tag vocabulary, in preference order.
    known_tags: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct EditorBackend {
    client: Client,
    documents_by_uri: Arc<RwLock<HashMap<Url, Arc<EditorDocument>>>>,
    serial_document_id: Arc<AtomicU32>,
    dispatch: Arc<CompletionDispatch>,
}

impl EditorBackend {
    pub fn new(client: Client, dispatch: Arc<CompletionDispatch>) -> Self {
        EditorBackend {
            client,
            documents_by_uri: Arc::new(RwLock::new(HashMap::new())),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            dispatch,
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Resolve completions for an open document at an LSP position.
    ///
    /// Every candidate carries a text edit replacing the partial token
    /// between the resolved start offset and the cursor. `None` means no
    /// suggestion; the client shows no popup.
    async fn completions_at(
        &self,
        document: &EditorDocument,
        position: Position,
    ) -> Option<CompletionResponse> {
        let state = document.state.read().await;
        let text = state.text.to_string();
        let cursor_char = lsp_position_to_char(&position, &state.text);
        let cursor = state.text.char_to_byte(cursor_char);

        let query = CompletionQuery::new(&text, cursor);
        let outcome = self.dispatch.resolve(document.language, &query)?;

        let replace_range = Range {
            start: char_to_lsp_position(state.text.byte_to_char(outcome.from), &state.text),
            end: char_to_lsp_position(cursor_char, &state.text),
        };
        let items = outcome
            .candidates
            .iter()
            .enumerate()
            .map(|(sort_order, candidate)| {
                let mut item = candidate.to_completion_item(sort_order);
                item.text_edit = Some(CompletionTextEdit::Edit(TextEdit {
                    range: replace_range,
                    new_text: candidate.label.clone(),
                }));
                item
            })
            .collect();
        Some(CompletionResponse::Array(items))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for EditorBackend {
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize: {:?}", params.client_info);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["<".to_string(), ":".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Server initialized");
        self.client
            .log_message(MessageType::INFO, "webedit language server ready")
            .await;
    }

    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let language_id = params.text_document.language_id;
        let version = params.text_document.version;

        let language: Language = match language_id.parse() {
            Ok(language) => language,
            Err(e) => {
                // Editor setup fails here; the document is never registered
                // and no completion wiring happens for it.
                error!("{} for {}, completion disabled", e, uri);
                return;
            }
        };

        let document_id = self.next_document_id();
        let document = Arc::new(EditorDocument::new(
            document_id,
            language,
            uri.clone(),
            &params.text_document.text,
            version,
        ));
        self.documents_by_uri
            .write()
            .await
            .insert(uri.clone(), document);
        info!(
            "Opened document: URI={}, id={}, language={}, version={}",
            uri, document_id, language, version
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        if let Some(document) = self.documents_by_uri.read().await.get(&uri) {
            if document.apply(params.content_changes, version).await.is_none() {
                warn!("Failed to apply changes to document with URI={}", uri);
            }
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(document) = self.documents_by_uri.read().await.get(&uri) {
            document.mark_clean().await;
            debug!("Marked document clean: URI={}", uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(document) = self.documents_by_uri.write().await.remove(&uri) {
            info!("Closed document: URI={}, id={}", uri, document.id);
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings: Settings = match serde_json::from_value(params.settings) {
            Ok(settings) => settings,
            Err(e) => {
                debug!("Ignoring unrecognized configuration payload: {}", e);
                return;
            }
        };
        if let Some(tags) = settings.html.and_then(|html| html.known_tags) {
            info!("Replacing HTML tag vocabulary ({} entries)", tags.len());
            self.dispatch.vocabulary().replace(tags);
        }
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> jsonrpc::Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!("Completion request at {}:{:?}", uri, position);

        let document = match self.documents_by_uri.read().await.get(&uri) {
            Some(document) => Arc::clone(document),
            None => {
                debug!("Document not found: {}", uri);
                return Ok(None);
            }
        };

        Ok(self.completions_at(&document, position).await)
    }
}
