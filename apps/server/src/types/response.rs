// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holiday lookup response returned to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayResponse {
    /// Provider metadata, passed through untouched.
    pub meta: Map<String, Value>,
    /// Holiday listing.
    pub response: HolidayList,
}

/// Container for the holiday sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayList {
    /// Holidays in provider order (possibly empty).
    pub holidays: Vec<Holiday>,
}

/// A single holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub description: String,
    pub date: HolidayDate,
    /// Categories such as "National holiday" or "Observance".
    #[serde(rename = "type")]
    pub kind: Vec<String>,
}

/// Holiday date as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayDate {
    /// ISO-8601 date, optionally with a time component.
    pub iso: String,
}

impl HolidayResponse {
    /// Validate a raw provider payload and coerce it into the response schema.
    ///
    /// Fields the schema does not declare are dropped.
    pub fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let has_holidays = payload
            .get("response")
            .and_then(|response| response.get("holidays"))
            .is_some();

        if !has_holidays {
            tracing::warn!("Provider payload is missing response.holidays");
            return Err(ApiError::InvalidUpstreamData);
        }

        Self::deserialize(payload).map_err(|e| {
            tracing::warn!(error = %e, "Provider payload does not match holiday schema");
            ApiError::InvalidUpstreamData
        })
    }
}
