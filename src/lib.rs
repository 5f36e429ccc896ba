//! Kashshaf Text - Arabic text alignment and query pattern generation
//!
//! Library backing the search surface of the Kashshaf research environment:
//! aligns displayed Arabic text against the token numbering of the external
//! search index so match positions can be highlighted and clipped, expands
//! structured name descriptions into exhaustive search pattern sets, and
//! validates wildcard usage before a query is dispatched.
//!
//! Everything here is a pure, synchronous function over immutable input; the
//! index itself, morphology, and persistence live elsewhere.

pub mod align;
pub mod cache;
pub mod chars;
pub mod error;
pub mod ids;
pub mod normalize;
pub mod patterns;
pub mod query;
pub mod wildcard;

pub use align::{
    char_span_to_bytes, render_match, strip_html, CharToTokenMap, HighlightRange, RenderedMatch,
    SnippetWindow,
};
pub use cache::{AlignmentCache, PageKey};
pub use chars::{classify, is_arabic_letter, is_boundary, is_tashkil, is_transparent, CharClass};
pub use error::KashshafTextError;
pub use ids::IdGenerator;
pub use normalize::{normalize_arabic, normalize_root_query};
pub use patterns::{
    expand_with_proclitics, generate_display_patterns, generate_patterns,
    generate_search_patterns, Connector, NameForm, PatternSet,
};
pub use query::{SearchMode, SearchTerm};
pub use wildcard::{
    parse_wildcard_query, validate_wildcard, WildcardKind, WildcardQueryInfo, WILDCARD,
};
