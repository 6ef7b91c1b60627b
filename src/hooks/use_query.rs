use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Named server snapshots the console keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ChannelList,
    Plugins,
    Categories,
    LiveConfig,
}

impl QueryKey {
    const COUNT: usize = 4;

    fn slot(self) -> usize {
        match self {
            QueryKey::ChannelList => 0,
            QueryKey::Plugins => 1,
            QueryKey::Categories => 2,
            QueryKey::LiveConfig => 3,
        }
    }
}

/// One version counter per key. Fetch effects read the counter, so bumping
/// it makes them run again.
#[derive(Clone, Copy)]
pub struct QueryCache {
    versions: [RwSignal<u64>; QueryKey::COUNT],
}

impl QueryCache {
    pub fn new() -> Self {
        Self { versions: std::array::from_fn(|_| RwSignal::new(0)) }
    }

    /// Subscribes the running effect to `key` and returns its version.
    pub fn track(&self, key: QueryKey) -> u64 {
        self.versions[key.slot()].get()
    }

    pub fn version(&self, key: QueryKey) -> u64 {
        self.versions[key.slot()].get_untracked()
    }

    /// True when a response fetched at `version` is still the newest request.
    pub fn is_current(&self, key: QueryKey, version: u64) -> bool {
        self.version(key) == version
    }

    pub fn invalidate(&self, key: QueryKey) {
        self.versions[key.slot()].update(|v| *v += 1);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Refetches `key` every `interval_ms` and whenever the window regains
/// focus, for as long as the calling component is mounted.
pub fn use_polling(cache: QueryCache, key: QueryKey, interval_ms: u32) {
    let alive = Arc::new(AtomicBool::new(true));

    let ticker = alive.clone();
    spawn_local(async move {
        loop {
            TimeoutFuture::new(interval_ms).await;
            if !ticker.load(Ordering::Relaxed) {
                break;
            }
            cache.invalidate(key);
        }
    });

    let focus = window_event_listener(ev::focus, move |_| cache.invalidate(key));

    on_cleanup(move || {
        alive.store(false, Ordering::Relaxed);
        focus.remove();
    });
}
