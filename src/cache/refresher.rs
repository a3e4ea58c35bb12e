use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::time::sleep_until;
use tracing::debug;

use crate::cache::entry::Entry;
use crate::sources::fetch::Fetcher;

/// When to refetch relative to an entry's TTL. 0.90 means "once 90% of the
/// validity window has elapsed", trading request rate against staleness risk.
#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    pub refresh_fraction: f64,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self { refresh_fraction: 0.90 }
    }
}

/// Keeps a single resource's slot fresh; never returns.
///
/// The slot starts empty, is populated by the first successful fetch, and is
/// only ever replaced whole. A non-positive TTL puts the wake deadline in the
/// past, so `sleep_until` yields immediately and the loop proceeds straight
/// to the next fetch; each iteration still blocks on a full network
/// round-trip, so there is no busy spin.
pub(crate) async fn run(
    name: String,
    slot: Arc<ArcSwapOption<Entry>>,
    fetcher: Fetcher,
    policy: RefreshPolicy,
) {
    loop {
        let entry = fetcher.fetch(&name).await;
        let wake_at = entry.refresh_at(policy.refresh_fraction);
        slot.store(Some(entry));
        debug!("[{}]: sleeping until refresh deadline", name);
        sleep_until(wake_at).await;
        debug!("[{}]: woke up for refresh", name);
    }
}
