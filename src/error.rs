//! Error types for Kashshaf Text

use thiserror::Error;

/// Errors surfaced to the caller before a query is sent to the search service.
///
/// The alignment and pattern-generation paths never fail; malformed input
/// degrades to empty output there. Only query validation rejects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KashshafTextError {
    #[error("Wildcards are only supported in surface search")]
    WildcardWrongMode,

    #[error("Only one wildcard (*) is allowed per search")]
    MultipleWildcards,

    #[error("A word cannot begin with a wildcard")]
    LeadingWildcard,

    #[error("An internal wildcard needs at least 2 letters before it")]
    ShortWildcardStem,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl serde::Serialize for KashshafTextError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
