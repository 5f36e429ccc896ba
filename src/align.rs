//! Token alignment between display text and the tokenized index
//!
//! Search results carry `matched_token_indices` counted over the *stripped*
//! text (punctuation, Latin, and digits removed before tokenization). To
//! highlight matches inside the displayed, fully punctuated text, we rebuild
//! that token numbering character by character and convert token indices back
//! into character ranges.
//!
//! Nothing in this module fails: search-result bodies are untrusted external
//! data, and rendering degrades to empty maps/ranges instead of erroring.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::chars::{classify, CharClass};

/// Half-open character range `[start, end)` into a display string.
///
/// Offsets count `char`s, not bytes; use [`char_span_to_bytes`] before
/// slicing a Rust `&str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

/// A clipped sub-range of the display string centered on a target token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetWindow {
    /// First character of the snippet.
    pub start: usize,
    /// One past the last character of the snippet.
    pub end: usize,
    /// First token inside the window.
    pub start_token: u32,
    /// One past the last token inside the window.
    pub end_token: u32,
    /// Whether the window start was cut away from token 0, so the caller
    /// should render a leading ellipsis.
    pub truncated_start: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Character belongs to this token.
    Token(u32),
    /// Stripped before indexing: no token index, does not end the word.
    Transparent,
    /// Whitespace or other true boundary.
    Boundary,
}

/// One entry per character of a display string, mapping it to the token
/// index the external tokenizer would assign, or to no token at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharToTokenMap {
    slots: Vec<Slot>,
    token_count: u32,
}

impl CharToTokenMap {
    /// Walk the text once, left to right, numbering maximal letter/diacritic
    /// runs. Transparent characters join whichever run they fall inside
    /// without affecting the count.
    pub fn build(text: &str) -> Self {
        let mut slots = Vec::with_capacity(text.len());
        let mut current: u32 = 0;
        let mut in_word = false;

        for c in text.chars() {
            match classify(c) {
                CharClass::ArabicLetter | CharClass::Tashkil => {
                    slots.push(Slot::Token(current));
                    in_word = true;
                }
                CharClass::Punctuation | CharClass::Latin | CharClass::Digit => {
                    slots.push(Slot::Transparent);
                }
                CharClass::Other => {
                    slots.push(Slot::Boundary);
                    if in_word {
                        current += 1;
                        in_word = false;
                    }
                }
            }
        }

        let token_count = if in_word { current + 1 } else { current };
        Self { slots, token_count }
    }

    /// Number of characters covered by the map.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of tokens the external tokenizer would produce for this text.
    pub fn token_count(&self) -> u32 {
        self.token_count
    }

    /// Token index at a character position, if that character carries one.
    pub fn token_index(&self, char_pos: usize) -> Option<u32> {
        match self.slots.get(char_pos) {
            Some(Slot::Token(idx)) => Some(*idx),
            _ => None,
        }
    }

    /// Character ranges covering the given matched token indices, sorted and
    /// non-overlapping. Indices absent from the text produce no range.
    ///
    /// Transparent characters inside an open run do not close it (they sit
    /// within the surrounding token's span), but emitted ranges end after the
    /// last matched-token character, so trailing punctuation stays
    /// unhighlighted.
    pub fn highlight_ranges(&self, matched_indices: &[u32]) -> Vec<HighlightRange> {
        if matched_indices.is_empty() || self.slots.is_empty() {
            return Vec::new();
        }
        let matched: HashSet<u32> = matched_indices.iter().copied().collect();

        let mut ranges = Vec::new();
        let mut start: Option<usize> = None;
        let mut last_hit = 0usize;

        for (pos, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Token(idx) if matched.contains(idx) => {
                    if start.is_none() {
                        start = Some(pos);
                    }
                    last_hit = pos;
                }
                Slot::Transparent => {}
                Slot::Token(_) | Slot::Boundary => {
                    if let Some(s) = start.take() {
                        ranges.push(HighlightRange { start: s, end: last_hit + 1 });
                    }
                }
            }
        }
        if let Some(s) = start {
            ranges.push(HighlightRange { start: s, end: last_hit + 1 });
        }

        ranges
    }

    /// First and last character positions carrying the given token index.
    /// Used for click-to-token lookups.
    pub fn token_char_range(&self, token: u32) -> Option<HighlightRange> {
        let mut first = None;
        let mut last = None;
        for (pos, slot) in self.slots.iter().enumerate() {
            if *slot == Slot::Token(token) {
                if first.is_none() {
                    first = Some(pos);
                }
                last = Some(pos);
            }
        }
        match (first, last) {
            (Some(s), Some(e)) => Some(HighlightRange { start: s, end: e + 1 }),
            _ => None,
        }
    }

    /// Character window around `center_token` covering up to `tokens_before`
    /// tokens before it and `tokens_after` after it.
    ///
    /// When `max_distance_from_start` is given and the center token would sit
    /// farther from the window start than that budget, the start slides
    /// forward until the center is exactly that many tokens in. A window that
    /// finds no tokens degrades to the full text range.
    pub fn snippet_range(
        &self,
        center_token: u32,
        tokens_before: u32,
        tokens_after: u32,
        max_distance_from_start: Option<u32>,
    ) -> SnippetWindow {
        let full = SnippetWindow {
            start: 0,
            end: self.slots.len(),
            start_token: 0,
            end_token: self.token_count,
            truncated_start: false,
        };

        if self.token_count == 0 || center_token >= self.token_count {
            return full;
        }

        let mut start_token = center_token.saturating_sub(tokens_before);
        let end_token = center_token
            .saturating_add(tokens_after)
            .saturating_add(1)
            .min(self.token_count);

        if let Some(max_distance) = max_distance_from_start {
            if center_token - start_token > max_distance {
                start_token = center_token - max_distance;
            }
        }

        let mut first = None;
        let mut last = None;
        for (pos, slot) in self.slots.iter().enumerate() {
            if let Slot::Token(idx) = slot {
                if *idx >= start_token && *idx < end_token {
                    if first.is_none() {
                        first = Some(pos);
                    }
                    last = Some(pos);
                }
            }
        }

        match (first, last) {
            (Some(s), Some(e)) => SnippetWindow {
                start: s,
                end: e + 1,
                start_token,
                end_token,
                truncated_start: start_token > 0,
            },
            _ => full,
        }
    }
}

static LINE_BREAKS: OnceLock<Regex> = OnceLock::new();
static TAGS: OnceLock<Regex> = OnceLock::new();

/// Replace line-break markup with a newline and strip all remaining tags.
///
/// Best-effort text normalization, not HTML parsing: malformed markup is left
/// in place rather than rejected.
pub fn strip_html(html: &str) -> String {
    let line_breaks = LINE_BREAKS.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
    let tags = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());

    let text = line_breaks.replace_all(html, "\n");
    tags.replace_all(&text, "").into_owned()
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Convert a half-open character span into byte offsets for slicing.
pub fn char_span_to_bytes(text: &str, start: usize, end: usize) -> (usize, usize) {
    (byte_offset(text, start), byte_offset(text, end))
}

/// Fully rendered alignment for one search result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedMatch {
    /// HTML-stripped display text the offsets refer to.
    pub text: String,
    pub snippet: SnippetWindow,
    pub ranges: Vec<HighlightRange>,
}

/// Strip markup, rebuild the token map, and compute highlight ranges plus a
/// snippet window centered on the first matched token.
pub fn render_match(
    body_html: &str,
    matched_indices: &[u32],
    tokens_before: u32,
    tokens_after: u32,
    max_distance_from_start: Option<u32>,
) -> RenderedMatch {
    let text = strip_html(body_html);
    let map = CharToTokenMap::build(&text);
    let ranges = map.highlight_ranges(matched_indices);

    let center = matched_indices
        .iter()
        .copied()
        .filter(|&idx| idx < map.token_count())
        .min()
        .unwrap_or(0);
    let snippet = map.snippet_range(center, tokens_before, tokens_after, max_distance_from_start);

    RenderedMatch { text, snippet, ranges }
}
