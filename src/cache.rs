//! Char-to-token map caching with LRU eviction
//!
//! Re-rendering a result list rebuilds the same maps over and over for pages
//! the user scrolls through. Maps are immutable once built, so they are
//! shared as `Arc`s out of a bounded LRU keyed by page identity.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::{debug, trace};

use crate::align::CharToTokenMap;

/// Identity of one page of one book part, the unit the search service
/// addresses results by.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct PageKey {
    pub id: u64,
    pub part_index: u64,
    pub page_id: u64,
}

impl PageKey {
    pub fn new(id: u64, part_index: u64, page_id: u64) -> Self {
        Self { id, part_index, page_id }
    }
}

/// Default capacity, in pages.
const DEFAULT_CAPACITY: usize = 1000;

/// Bounded cache of alignment maps keyed by page.
pub struct AlignmentCache {
    cache: Mutex<LruCache<PageKey, Arc<CharToTokenMap>>>,
}

impl AlignmentCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY).unwrap());
        Self { cache: Mutex::new(LruCache::new(capacity)) }
    }

    /// Return the cached map for a page, building it from the display text
    /// on a miss. The text must already be HTML-stripped.
    pub fn get_or_build(&self, key: PageKey, text: &str) -> Arc<CharToTokenMap> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(map) = cache.get(&key) {
            trace!(?key, "alignment cache hit");
            return Arc::clone(map);
        }

        let map = Arc::new(CharToTokenMap::build(text));
        debug!(?key, tokens = map.token_count(), "alignment cache miss, built map");
        cache.put(key, Arc::clone(&map));
        map
    }

    /// Drop one page, e.g. after its text was re-fetched.
    pub fn invalidate(&self, key: &PageKey) {
        self.cache.lock().unwrap().pop(key);
    }

    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
