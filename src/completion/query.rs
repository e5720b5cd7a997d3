//! Completion queries over document text
//!
//! A query is the ephemeral input to a resolver: the full document text and
//! the cursor position as a byte offset. Resolvers probe the text immediately
//! preceding the cursor with [`CompletionQuery::match_before`] and never
//! retain the query past a single invocation.

use regex::Regex;

/// Upper bound on how far before the cursor a context pattern is matched.
const LOOKBEHIND_LIMIT: usize = 250;

/// A contiguous match in the document text, ending exactly at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan<'a> {
    /// Byte offset where the match begins.
    pub from: usize,
    /// Byte offset where the match ends. Always equals the cursor offset.
    pub to: usize,
    /// The matched substring.
    pub text: &'a str,
}

/// Document text and cursor position for a single completion request.
///
/// Offsets are byte offsets into `text`. The caller owns the text; a query
/// borrows it for the duration of one resolution.
#[derive(Debug, Clone, Copy)]
pub struct CompletionQuery<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> CompletionQuery<'a> {
    pub fn new(text: &'a str, cursor: usize) -> Self {
        Self { text, cursor }
    }

    /// The cursor position as a byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The full document text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Extract the substring denoted by `[from, to)`.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[from..to]
    }

    /// Match `pattern` against the text immediately preceding the cursor.
    ///
    /// The pattern must be end-anchored (`$`); the returned span then ends
    /// exactly at the cursor. Matching is restricted to the cursor's line and
    /// clamped to a fixed lookbehind window. Returns `None` when the cursor
    /// is out of range, sits on a non-character boundary, or the pattern does
    /// not reach the cursor. A `None` here is the normal way of signaling
    /// that the surrounding text is not a completion context.
    pub fn match_before(&self, pattern: &Regex) -> Option<MatchSpan<'a>> {
        if self.cursor > self.text.len() || !self.text.is_char_boundary(self.cursor) {
            return None;
        }

        let line_start = self.text[..self.cursor]
            .rfind('\n')
            .map_or(0, |newline| newline + 1);
        let mut window_start = line_start.max(self.cursor.saturating_sub(LOOKBEHIND_LIMIT));
        while !self.text.is_char_boundary(window_start) {
            window_start += 1;
        }

        let window = &self.text[window_start..self.cursor];
        let found = pattern.find(window)?;
        if found.end() != window.len() {
            // The pattern was not end-anchored and stopped short of the cursor.
            return None;
        }

        Some(MatchSpan {
            from: window_start + found.start(),
            to: self.cursor,
            text: found.as_str(),
        })
    }
}
