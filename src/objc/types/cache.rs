//! Memoizes decode results for encodings that are looked up repeatedly, such as ivar and property
//! types gathered while walking a class hierarchy.

use ahash::AHashMap;
use tracing::trace;

use super::decode::Decoder;
use super::node::TypeNode;

#[derive(Default, Debug)]
pub struct TypeCache {
    decoder: Decoder,
    entries: AHashMap<String, Option<TypeNode>>,
    hits: usize,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: Decoder) -> Self {
        Self {
            decoder,
            entries: AHashMap::new(),
            hits: 0,
        }
    }

    /// Decodes `encoding` once; later calls return the stored result, including failures.
    pub fn decode(&mut self, encoding: &str) -> Option<&TypeNode> {
        if self.entries.contains_key(encoding) {
            self.hits += 1;
            trace!(encoding, "type cache hit");
        } else {
            trace!(encoding, "type cache miss");
            let decoded = self.decoder.decode(encoding);
            self.entries.insert(encoding.to_owned(), decoded);
        }
        self.entries.get(encoding).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}

#[cfg(test)]
mod tests {
    //! Cache bookkeeping for repeated lookups.
    use super::*;

    #[test]
    fn repeated_lookups_reuse_entries() {
        // the second lookup must be served from the map
        let mut cache = TypeCache::new();
        let first = cache.decode("^i").cloned();
        let second = cache.decode("^i").cloned();
        assert_eq!(first, second, "cached value should match the first decode");
        assert_eq!(cache.len(), 1, "one distinct encoding was seen");
        assert_eq!(cache.hits(), 1, "second lookup is a hit");
    }

    #[test]
    fn failures_are_cached_too() {
        let mut cache = TypeCache::new();
        assert!(cache.decode("Z").is_none(), "unknown symbol fails");
        assert!(cache.decode("Z").is_none(), "failure is remembered");
        assert_eq!(cache.hits(), 1, "failed lookups still count as hits");
        cache.clear();
        assert!(cache.is_empty(), "clear drops every entry");
        assert_eq!(cache.hits(), 0, "clear resets counters");
    }
}
