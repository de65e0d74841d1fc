// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calendarific client fronted by the LRU cache.

use super::cache::{HolidayCache, HolidayQuery};
use super::calendarific::CalendarificClient;
use crate::error::ApiError;
use serde_json::Value;
use std::sync::Arc;

/// Returns cached payloads when present, otherwise calls the provider once
/// and caches the result.
pub struct CachedFetcher {
    client: CalendarificClient,
    cache: HolidayCache,
}

impl CachedFetcher {
    pub fn new(client: CalendarificClient, cache: HolidayCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }

    /// Fetch a payload for `query`.
    ///
    /// Failed provider calls are not cached. Two concurrent misses for the same
    /// query may both reach the provider; the later insert wins.
    pub async fn fetch(&self, query: &HolidayQuery) -> Result<Arc<Value>, ApiError> {
        if let Some(payload) = self.cache.get(query) {
            tracing::info!(country = query.country_code(), year = query.year(), "Cache HIT");
            return Ok(payload);
        }

        tracing::info!(
            country = query.country_code(),
            year = query.year(),
            "Cache MISS - calling Calendarific"
        );

        let payload = Arc::new(self.client.fetch_holidays(query).await?);

        if let Some(evicted) = self.cache.insert(query.clone(), payload.clone()) {
            tracing::debug!(
                country = evicted.country_code(),
                year = evicted.year(),
                "Evicted least recently used entry"
            );
        }

        tracing::debug!(cached_entries = self.cache.len(), "Cached provider payload");

        Ok(payload)
    }
}
