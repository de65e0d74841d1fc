// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for provider access and caching.

pub mod cache;
pub mod calendarific;
pub mod fetcher;

pub use cache::{HolidayCache, HolidayQuery};
pub use calendarific::CalendarificClient;
pub use fetcher::CachedFetcher;
