// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;

/// Path parameters of `GET /api/v1/holidays/:country_code/:year`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayPath {
    /// Country code passed through to the provider as-is (e.g. "US").
    pub country_code: String,
    pub year: i32,
}
