//! Memoization state for the search engine
//!
//! The cache is owned by the caller and passed into every engine call. It
//! remembers which bank it was filled from and starts over when it sees a
//! different one. Results for different search configs live in separate
//! buckets, so switching rules or cost policy never mixes answers.

use super::{BestGuess, SearchConfig};
use crate::bank::{Bank, SetHash};
use rustc_hash::FxHashMap;

/// Position of a search node, independent of entry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub set: SetHash,
    pub attempts_allowed: u32,
    pub attempts_used: u32,
}

struct CacheBucket {
    config: SearchConfig,
    entries: FxHashMap<CacheKey, BestGuess>,
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Caller-owned memoization of best guesses
#[derive(Default)]
pub struct SearchCache {
    bank_id: Option<u64>,
    buckets: Vec<CacheBucket>,
    hits: u64,
    misses: u64,
}

impl SearchCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything if the cache was filled from another bank
    pub fn bind(&mut self, bank: &Bank) {
        if self.bank_id != Some(bank.id()) {
            if self.bank_id.is_some() {
                log::debug!("Search cache reset for bank {}", bank.id());
            }
            self.clear();
            self.bank_id = Some(bank.id());
        }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn get(&mut self, config: &SearchConfig, key: &CacheKey) -> Option<BestGuess> {
        let found = self
            .buckets
            .iter()
            .find(|bucket| bucket.config == *config)
            .and_then(|bucket| bucket.entries.get(key).copied());
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn insert(&mut self, config: &SearchConfig, key: CacheKey, best: BestGuess) {
        let index = match self.buckets.iter().position(|b| b.config == *config) {
            Some(index) => index,
            None => {
                self.buckets.push(CacheBucket {
                    config: config.clone(),
                    entries: FxHashMap::default(),
                });
                self.buckets.len() - 1
            }
        };
        self.buckets[index].entries.insert(key, best);
    }

    /// Entries across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.len(),
        }
    }
}
