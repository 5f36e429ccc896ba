//! Wildcard query validation and parsing
//!
//! A query may carry at most one `*`, and only against the surface index,
//! where the literal text is stored. Validation gates whether the query is
//! sent to the search service at all; it never rewrites the query.

use serde::{Deserialize, Serialize};

use crate::chars::is_arabic_letter;
use crate::error::KashshafTextError;
use crate::query::SearchMode;

/// The wildcard character accepted in surface queries.
pub const WILDCARD: char = '*';

/// Where the wildcard sits within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildcardKind {
    /// Nothing follows the `*` in its word, e.g. `كتا*`.
    Prefix,
    /// Characters follow the `*`, e.g. `كت*اب`.
    Internal,
}

/// Location and shape of the single wildcard in a well-formed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardQueryInfo {
    /// Zero-based index of the word holding the wildcard.
    pub term_index: usize,
    pub kind: WildcardKind,
    /// Literal characters before the `*` in that word.
    pub prefix: String,
    /// Literal characters after the `*`, for internal wildcards.
    pub suffix: Option<String>,
    /// All words of the query.
    pub terms: Vec<String>,
}

/// Validate wildcard usage in a query.
///
/// Rules:
/// 1. surface mode only
/// 2. at most one `*` in the whole query
/// 3. `*` never starts a word
/// 4. an internal `*` needs at least 2 Arabic letters (diacritics excluded)
///    before it in its word
///
/// A query without a wildcard is always valid here.
pub fn validate_wildcard(query: &str, mode: SearchMode) -> Result<(), KashshafTextError> {
    let trimmed = query.trim();

    if !trimmed.contains(WILDCARD) {
        return Ok(());
    }
    if mode != SearchMode::Surface {
        return Err(KashshafTextError::WildcardWrongMode);
    }
    if trimmed.matches(WILDCARD).count() > 1 {
        return Err(KashshafTextError::MultipleWildcards);
    }

    for word in trimmed.split_whitespace() {
        let Some(wildcard_pos) = word.find(WILDCARD) else {
            continue;
        };
        if wildcard_pos == 0 {
            return Err(KashshafTextError::LeadingWildcard);
        }

        let suffix = &word[wildcard_pos + WILDCARD.len_utf8()..];
        if !suffix.is_empty() {
            let stem_letters = word[..wildcard_pos]
                .chars()
                .filter(|&c| is_arabic_letter(c))
                .count();
            if stem_letters < 2 {
                return Err(KashshafTextError::ShortWildcardStem);
            }
        }
    }

    Ok(())
}

/// Locate the wildcard in a query already known to be well-formed. Returns
/// `None` when the query has no wildcard; never fails.
pub fn parse_wildcard_query(query: &str) -> Option<WildcardQueryInfo> {
    let terms: Vec<String> = query.trim().split_whitespace().map(str::to_string).collect();

    for (term_index, word) in terms.iter().enumerate() {
        let Some(wildcard_pos) = word.find(WILDCARD) else {
            continue;
        };

        let prefix = word[..wildcard_pos].to_string();
        let suffix = &word[wildcard_pos + WILDCARD.len_utf8()..];
        let (kind, suffix) = if suffix.is_empty() {
            (WildcardKind::Prefix, None)
        } else {
            (WildcardKind::Internal, Some(suffix.to_string()))
        };

        return Some(WildcardQueryInfo { term_index, kind, prefix, suffix, terms });
    }

    None
}
