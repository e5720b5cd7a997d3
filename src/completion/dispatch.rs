//! Per-language routing of completion requests
//!
//! Each supported language has exactly one resolver. Binding a document to a
//! language happens once, at editor construction, and is the only fallible
//! step; resolving a query afterwards always yields either an outcome or
//! `None`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::property_value::PropertyValueResolver;
use super::query::CompletionQuery;
use super::result::CompletionOutcome;
use super::tag_name::TagNameResolver;
use super::vocabulary::HtmlVocabulary;

/// Raised when a document names a language no resolver is registered for.
/// Editor setup aborts on this; it is never produced per keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

/// Languages with a registered resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Html,
    Css,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Css => "css",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "html" => Ok(Language::Html),
            "css" => Ok(Language::Css),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Owns the resolvers and the HTML vocabulary, and routes each query to the
/// resolver for the document's language.
#[derive(Debug)]
pub struct CompletionDispatch {
    tag_names: TagNameResolver,
    property_values: PropertyValueResolver,
    vocabulary: Arc<HtmlVocabulary>,
}

impl CompletionDispatch {
    /// Create a dispatch with the default seed vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(Arc::new(HtmlVocabulary::new()))
    }

    /// Create a dispatch around a host-supplied vocabulary.
    pub fn with_vocabulary(vocabulary: Arc<HtmlVocabulary>) -> Self {
        Self {
            tag_names: TagNameResolver::new(Arc::clone(&vocabulary)),
            property_values: PropertyValueResolver::new(),
            vocabulary,
        }
    }

    /// The HTML vocabulary, for host-driven replacement.
    pub fn vocabulary(&self) -> &HtmlVocabulary {
        &self.vocabulary
    }

    /// Resolve a completion request. Pure in (document text, cursor,
    /// vocabulary state); `None` means no suggestion and is a normal outcome.
    pub fn resolve(&self, language: Language, query: &CompletionQuery) -> Option<CompletionOutcome> {
        match language {
            Language::Html => self.tag_names.resolve(query),
            Language::Css => self.property_values.resolve(query),
        }
    }
}

impl Default for CompletionDispatch {
    fn default() -> Self {
        Self::new()
    }
}
