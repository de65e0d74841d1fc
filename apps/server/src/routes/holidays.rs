// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Holiday lookup endpoint.

use crate::error::ApiError;
use crate::services::HolidayQuery;
use crate::types::{HolidayPath, HolidayResponse};
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

/// GET /api/v1/holidays/:country_code/:year - Holidays for one country and year.
pub async fn get_holidays(
    State(state): State<AppState>,
    path: Result<Path<HolidayPath>, PathRejection>,
) -> Result<Json<HolidayResponse>, ApiError> {
    let Path(HolidayPath { country_code, year }) = path?;

    // Checked before anything else so no upstream call happens without a key
    let api_key = state.config.api_key.resolve().ok_or(ApiError::MissingApiKey)?;

    tracing::debug!(country = %country_code, year, "Holiday lookup");

    let query = HolidayQuery::new(api_key, country_code, year);
    let payload = state.fetcher.fetch(&query).await?;
    let response = HolidayResponse::from_payload(&payload)?;

    tracing::debug!(
        country = query.country_code(),
        year,
        holidays = response.response.holidays.len(),
        "Holiday lookup complete"
    );

    Ok(Json(response))
}
