//! Outline memoization
//!
//! Outlines are pure functions of `(width, height, radius, smoothing)`, so
//! they can be shared between layers and book instances of the same size
//! class. The cache keys on the exact bit pattern of the inputs.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::squircle::{generate_outline, CornerSpec, Dimensions, Outline};

type OutlineKey = [u32; 4];

fn key(width: f32, height: f32, radius: f32, smoothing: f32) -> OutlineKey {
    [
        width.to_bits(),
        height.to_bits(),
        radius.to_bits(),
        smoothing.to_bits(),
    ]
}

/// Hit/miss counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes generated outlines by their input tuple
#[derive(Debug, Default)]
pub struct OutlineCache {
    entries: FxHashMap<OutlineKey, Arc<Outline>>,
    stats: CacheStats,
}

impl OutlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outline for these inputs, generating it on a miss
    pub fn get_or_generate(
        &mut self,
        width: f32,
        height: f32,
        radius: f32,
        smoothing: f32,
    ) -> Arc<Outline> {
        let k = key(width, height, radius, smoothing);
        if let Some(outline) = self.entries.get(&k) {
            self.stats.hits += 1;
            return Arc::clone(outline);
        }

        self.stats.misses += 1;
        tracing::trace!(width, height, radius, smoothing, "generating outline");
        let outline = Arc::new(generate_outline(width, height, radius, smoothing));
        self.entries.insert(k, Arc::clone(&outline));
        outline
    }

    /// Same as [`OutlineCache::get_or_generate`] with typed inputs
    pub fn outline(&mut self, dimensions: Dimensions, corner: CornerSpec) -> Arc<Outline> {
        self.get_or_generate(
            dimensions.width(),
            dimensions.height(),
            corner.radius,
            corner.smoothing,
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every cached outline
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_shares_outlines() {
        let mut cache = OutlineCache::new();
        let a = cache.get_or_generate(200.0, 268.0, 20.0, 1.0);
        let b = cache.get_or_generate(200.0, 268.0, 20.0, 1.0);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });

        let c = cache.get_or_generate(200.0, 263.0, 20.0, 1.0);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
