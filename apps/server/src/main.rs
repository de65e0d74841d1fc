// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Holidays Server - caching proxy for the Calendarific holiday API.
//!
//! The server forwards holiday lookups to Calendarific, keeps the most recent
//! responses in a bounded in-memory LRU cache, and reshapes the provider
//! payload into a typed schema for the frontend.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/holidays/:country_code/:year` - Holidays for a country and year
//!
//! The Calendarific key is read from `CALENDARIFIC_API_KEY` on every request;
//! when it is missing, lookups fail with HTTP 500 but the server still runs.
//! A `.env` file, if present, is loaded into the environment at startup.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;
#[cfg(test)]
mod test_support;
mod types;

use config::Config;
use services::{CachedFetcher, CalendarificClient, HolidayCache};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<CachedFetcher>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the provider client and an empty cache from `config`.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = CalendarificClient::new(&config.api_url, config.upstream_timeout())?;
        let cache = HolidayCache::new(config.cache_capacity);

        Ok(Self {
            fetcher: Arc::new(CachedFetcher::new(client, cache)),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = config::load_dotenv(None);
    let config = Config::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,holidays_server=debug"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }

    tracing::info!(
        port = config.port,
        api_url = %config.api_url,
        cache_capacity = config.cache_capacity,
        upstream_timeout_secs = config.upstream_timeout_secs,
        cors_origins = ?config.cors_origins,
        "Starting Holidays Server"
    );

    if let Some(path) = &dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment from .env file");
    }

    if config.api_key.resolve().is_none() {
        tracing::warn!(
            var = config::API_KEY_VAR,
            "Calendarific API key is not set; holiday lookups will fail until it is"
        );
    }

    let port = config.port;
    let state = AppState::new(config).context("Failed to build HTTP client")?;
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
