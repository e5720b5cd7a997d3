//! Context-sensitive code completion for HTML and CSS
//!
//! This module provides:
//! - Lexical context detection against the text before the cursor (no
//!   parsing; a deliberate regular-grammar heuristic)
//! - Tag name completion from a host-replaceable HTML vocabulary
//! - Property value completion from a fixed CSS table
//! - Prefix filtering and rank assignment in vocabulary order
//! - Per-language dispatch with a single resolver per language

pub mod dispatch;
pub mod property_value;
pub mod query;
pub mod result;
pub mod tag_name;
pub mod vocabulary;

pub use dispatch::{CompletionDispatch, Language, UnknownLanguage};
pub use property_value::PropertyValueResolver;
pub use query::{CompletionQuery, MatchSpan};
pub use result::{CompletionCandidate, CompletionOutcome, KIND_VALUE};
pub use tag_name::TagNameResolver;
pub use vocabulary::{css_property_values, HtmlVocabulary, DEFAULT_HTML_TAGS};
