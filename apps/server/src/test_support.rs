// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local stand-in for the Calendarific API used by tests.

use axum::{
    extract::Query,
    http::{header, StatusCode},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves a fixed status and JSON body on `/holidays` and records each call's
/// query parameters.
pub struct MockUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
    delay_ms: Arc<AtomicU64>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockUpstream {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let delay_ms = Arc::new(AtomicU64::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let body = body.to_string();

        let handler = {
            let hits = hits.clone();
            let delay_ms = delay_ms.clone();
            let queries = queries.clone();
            move |Query(params): Query<HashMap<String, String>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                queries.lock().unwrap().push(params);

                let delay = delay_ms.load(Ordering::SeqCst);
                if delay > 0 {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }

                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        };

        let app = Router::new().route("/holidays", get(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/holidays", addr),
            hits,
            delay_ms,
            queries,
        }
    }

    /// Delay every response by `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.queries.lock().unwrap().last().cloned()
    }

    /// Number of calls made for one country and year.
    pub fn hits_for(&self, country: &str, year: i32) -> usize {
        let year = year.to_string();
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| {
                q.get("country").map(String::as_str) == Some(country)
                    && q.get("year") == Some(&year)
            })
            .count()
    }
}
