use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use arc_swap::ArcSwapOption;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::entry::Entry;
use crate::cache::refresher::{self, RefreshPolicy};
use crate::sources::fetch::Fetcher;

/// Registry-internal record: the slot the refresher writes into, plus the
/// handles needed to tear the refresher down.
struct WatchedResource {
    slot: Arc<ArcSwapOption<Entry>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Maps resource names to always-fresh entries, one background refresher per
/// name. Lookups are non-blocking: a short map read lock plus a lock-free
/// slot load, never any network I/O.
pub struct CacheRegistry {
    resources: RwLock<HashMap<String, WatchedResource>>,
    fetcher: Fetcher,
    policy: RefreshPolicy,
}

impl CacheRegistry {
    pub fn new(fetcher: Fetcher, policy: RefreshPolicy) -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
            fetcher,
            policy,
        }
    }

    /// Start watching `name`. Idempotent: a second call while the name is
    /// registered does nothing. The write lock is held across the
    /// check-and-spawn, so concurrent calls for the same name still produce
    /// exactly one refresher. Must be called from within a tokio runtime.
    pub fn add_resource(&self, name: &str) {
        let mut resources = self.resources.write().expect("resources lock poisoned");
        if resources.contains_key(name) {
            debug!("resource '{}' already watched", name);
            return;
        }

        let slot: Arc<ArcSwapOption<Entry>> = Arc::new(ArcSwapOption::empty());
        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let name = name.to_owned();
            let slot = slot.clone();
            let fetcher = self.fetcher.clone();
            let policy = self.policy.clone();
            let cancel = cancel.clone();
            async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = refresher::run(name, slot, fetcher, policy) => {}
                }
            }
        });

        info!("watching resource '{}'", name);
        resources.insert(name.to_owned(), WatchedResource { slot, cancel, task });
    }

    /// Stop watching `name` and forget its entry. No-op for unknown names.
    /// After this returns, the refresher is cancelled and no further writes
    /// to the slot occur; an in-flight fetch is abandoned, not awaited.
    pub fn remove_resource(&self, name: &str) {
        let removed = {
            let mut resources = self.resources.write().expect("resources lock poisoned");
            resources.remove(name)
        };
        if let Some(watched) = removed {
            watched.cancel.cancel();
            watched.task.abort();
            info!("stopped watching resource '{}'", name);
        }
    }

    /// Current entry for `name`, or `None` if the name is not registered,
    /// its first fetch has not completed, or the entry has expired.
    /// Expiry is detected lazily here; there is no background sweep.
    pub fn get(&self, name: &str) -> Option<Arc<Entry>> {
        let entry = {
            let resources = self.resources.read().expect("resources lock poisoned");
            resources.get(name)?.slot.load_full()?
        };
        entry.is_fresh(Instant::now()).then_some(entry)
    }
}

impl Drop for CacheRegistry {
    fn drop(&mut self) {
        let resources = self.resources.get_mut().expect("resources lock poisoned");
        for (name, watched) in resources.drain() {
            watched.cancel.cancel();
            watched.task.abort();
            debug!("cancelled refresher for '{}'", name);
        }
    }
}
