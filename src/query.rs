//! Query-side types shared with the external search service

use serde::{Deserialize, Serialize};

/// Which indexed form a query runs against. Lemma and root forms are derived
/// by the external morphology pipeline; only surface search sees the literal
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Surface,
    #[default]
    Lemma,
    Root,
}

/// One query string paired with the mode it should run in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    pub query: String,
    pub mode: SearchMode,
}
