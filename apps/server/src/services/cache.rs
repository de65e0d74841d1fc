// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded in-memory LRU cache of provider payloads.

use lru::LruCache;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cache key: one provider lookup.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HolidayQuery {
    api_key: String,
    country_code: String,
    year: i32,
}

impl HolidayQuery {
    pub fn new(api_key: impl Into<String>, country_code: impl Into<String>, year: i32) -> Self {
        Self {
            api_key: api_key.into(),
            country_code: country_code.into(),
            year,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl std::fmt::Debug for HolidayQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayQuery")
            .field("api_key", &"<redacted>")
            .field("country_code", &self.country_code)
            .field("year", &self.year)
            .finish()
    }
}

/// Thread-safe LRU cache. Reads and writes both refresh recency.
pub struct HolidayCache {
    entries: Mutex<LruCache<HolidayQuery, Arc<Value>>>,
}

impl HolidayCache {
    /// Create a cache holding at most `capacity` payloads (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    // Entries are replaced whole, so a poisoned lock still guards a usable cache.
    fn lock(&self) -> MutexGuard<'_, LruCache<HolidayQuery, Arc<Value>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a payload, marking it most recently used.
    pub fn get(&self, query: &HolidayQuery) -> Option<Arc<Value>> {
        self.lock().get(query).cloned()
    }

    /// Store a payload. Returns the query evicted to make room, if any.
    pub fn insert(&self, query: HolidayQuery, payload: Arc<Value>) -> Option<HolidayQuery> {
        match self.lock().push(query.clone(), payload) {
            // `push` hands back the old entry when the key was already present
            Some((evicted, _)) if evicted != query => Some(evicted),
            _ => None,
        }
    }

    /// Check presence without touching recency.
    #[cfg(test)]
    pub fn contains(&self, query: &HolidayQuery) -> bool {
        self.lock().contains(query)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}
