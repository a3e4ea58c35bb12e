use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::info;

use proactive_cache::config::settings::Settings;
use proactive_cache::server::server::{self, AppState};
use proactive_cache::utils::logging;
use proactive_cache::{BackoffPolicy, CacheRegistry, Fetcher, RefreshPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read settings, set up logging
    // -------------------------------

    let settings = Settings::parse();
    logging::init_logging(settings.log_level, settings.log_format);

    // -------------------------------
    // 2. Build the origin fetcher
    // -------------------------------

    let client = Client::builder().build()?;
    let fetcher = Fetcher::new(
        client,
        settings.origin_base_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
        BackoffPolicy::new(settings.base_retry_interval_ms, settings.max_retry_interval_ms),
    );

    // -------------------------------
    // 3. Start one refresher per configured resource
    // -------------------------------

    let policy = RefreshPolicy {
        refresh_fraction: settings.refresh_fraction,
    };
    let cache = Arc::new(CacheRegistry::new(fetcher, policy));
    for name in &settings.resources {
        cache.add_resource(name);
    }
    info!("watching {} resources", settings.resources.len());

    // -------------------------------
    // 4. Serve lookups until shutdown
    // -------------------------------

    server::start(&settings.bind, AppState { cache }).await
}
