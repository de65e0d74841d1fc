// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calendarific REST API client.

use super::cache::HolidayQuery;
use crate::error::ApiError;
use serde_json::Value;
use std::time::Duration;

/// Calendarific holidays endpoint client.
#[derive(Debug, Clone)]
pub struct CalendarificClient {
    api_url: String,
    http: reqwest::Client,
}

impl CalendarificClient {
    /// Create a client for `api_url`; every request is bounded by `timeout`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url: api_url.to_string(),
            http,
        })
    }

    /// Fetch the raw holiday payload for one country and year.
    ///
    /// Transport failures, timeouts, non-success statuses and non-JSON bodies
    /// all surface as [`ApiError::Upstream`].
    pub async fn fetch_holidays(&self, query: &HolidayQuery) -> Result<Value, ApiError> {
        let year = query.year().to_string();
        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("api_key", query.api_key()),
                ("country", query.country_code()),
                ("year", year.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                country = query.country_code(),
                year = query.year(),
                "Calendarific returned an error status"
            );
        }

        let payload = resp.error_for_status()?.json::<Value>().await?;

        tracing::debug!(
            country = query.country_code(),
            year = query.year(),
            "Fetched holidays from Calendarific"
        );

        Ok(payload)
    }
}
