//! Snapshot cache with single-flight computation.
//!
//! At most one estimation pass runs per (airport, date) at any time. The
//! first caller of a missing key becomes the owner and spawns the pass as a
//! detached task; everyone else subscribes to a watch channel and receives
//! the same shared result. A waiter that gives up, or disappears entirely,
//! leaves the computation running so the result is ready for the next
//! request. Failures are broadcast but never cached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::AirportCode;
use crate::config::CacheSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::PredictionSnapshot;

/// Cache key: hour windows are sliced at read time and deliberately not part
/// of it, so every window query for a day shares one snapshot.
pub type CacheKey = (AirportCode, NaiveDate);

type ComputeOutcome = Result<Arc<PredictionSnapshot>, EngineError>;

enum Slot {
    Ready {
        snapshot: Arc<PredictionSnapshot>,
        stored_at: Instant,
    },
    Pending {
        rx: watch::Receiver<Option<ComputeOutcome>>,
        generation: u64,
    },
}

enum Lookup {
    Hit(Arc<PredictionSnapshot>),
    Wait {
        rx: watch::Receiver<Option<ComputeOutcome>>,
        generation: u64,
    },
    Own {
        tx: watch::Sender<Option<ComputeOutcome>>,
        rx: watch::Receiver<Option<ComputeOutcome>>,
        generation: u64,
    },
}

struct CacheState {
    slots: HashMap<CacheKey, Slot>,
    next_generation: u64,
}

struct CacheInner {
    state: Mutex<CacheState>,
    settings: CacheSettings,
}

/// Shared handle to the snapshot cache. Cloning is cheap and all clones
/// operate on the same slots.
#[derive(Clone)]
pub struct SnapshotCache {
    inner: Arc<CacheInner>,
}

impl SnapshotCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState {
                    slots: HashMap::new(),
                    next_generation: 0,
                }),
                settings,
            }),
        }
    }

    /// Return a fresh snapshot for `key`, running `compute` only when no
    /// fresh entry exists and no computation is already in flight.
    ///
    /// The computation runs as a detached task, so it survives its callers;
    /// each waiter gets at most `compute_timeout` before receiving a timeout
    /// error while the pass keeps going. An expired entry counts as a miss.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> EngineResult<Arc<PredictionSnapshot>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = EngineResult<PredictionSnapshot>> + Send + 'static,
    {
        let lookup = {
            let mut state = self.inner.state.lock();
            match state.slots.get(&key) {
                Some(Slot::Ready {
                    snapshot,
                    stored_at,
                }) if stored_at.elapsed() < self.inner.settings.ttl() => {
                    Lookup::Hit(Arc::clone(snapshot))
                }
                Some(Slot::Pending { rx, generation }) => Lookup::Wait {
                    rx: rx.clone(),
                    generation: *generation,
                },
                _ => {
                    let generation = state.next_generation;
                    state.next_generation += 1;
                    let (tx, rx) = watch::channel(None);
                    state.slots.insert(
                        key.clone(),
                        Slot::Pending {
                            rx: rx.clone(),
                            generation,
                        },
                    );
                    Lookup::Own { tx, rx, generation }
                }
            }
        };

        match lookup {
            Lookup::Hit(snapshot) => Ok(snapshot),
            Lookup::Wait { mut rx, generation } => self.wait(&key, generation, &mut rx).await,
            Lookup::Own {
                tx,
                mut rx,
                generation,
            } => {
                let cache = self.clone();
                let owner_key = key.clone();
                let future = compute();
                tokio::spawn(async move {
                    let outcome = future.await.map(Arc::new);
                    cache.store_outcome(&owner_key, generation, &outcome);
                    // Waiters may all be gone already; that is fine.
                    let _ = tx.send(Some(outcome));
                });
                self.wait(&key, generation, &mut rx).await
            }
        }
    }

    /// Drop every cached and pending entry.
    pub fn clear(&self) {
        self.inner.state.lock().slots.clear();
    }

    /// Number of occupied slots, ready and pending alike.
    pub fn len(&self) -> usize {
        self.inner.state.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn wait(
        &self,
        key: &CacheKey,
        generation: u64,
        rx: &mut watch::Receiver<Option<ComputeOutcome>>,
    ) -> EngineResult<Arc<PredictionSnapshot>> {
        let deadline = self.inner.settings.compute_timeout();
        let outcome = tokio::time::timeout(deadline, async {
            loop {
                let published = rx.borrow_and_update().clone();
                if let Some(outcome) = published {
                    return Some(outcome);
                }
                if rx.changed().await.is_err() {
                    return None;
                }
            }
        })
        .await;

        match outcome {
            Ok(Some(result)) => result,
            Ok(None) => {
                // The owner task vanished without publishing. Clear its slot
                // so the next request can start over.
                self.evict_generation(key, generation);
                Err(EngineError::internal(
                    "estimation pass was interrupted before completing",
                ))
            }
            Err(_) => Err(EngineError::ComputationTimeout {
                waited_ms: deadline.as_millis() as u64,
            }),
        }
    }

    /// Owner write-back: publish to the map only if this generation still
    /// holds the slot.
    fn store_outcome(&self, key: &CacheKey, generation: u64, outcome: &ComputeOutcome) {
        let mut state = self.inner.state.lock();
        let still_owner = matches!(
            state.slots.get(key),
            Some(Slot::Pending { generation: g, .. }) if *g == generation
        );
        if !still_owner {
            return;
        }
        match outcome {
            Ok(snapshot) => {
                state.slots.insert(
                    key.clone(),
                    Slot::Ready {
                        snapshot: Arc::clone(snapshot),
                        stored_at: Instant::now(),
                    },
                );
            }
            Err(_) => {
                state.slots.remove(key);
            }
        }
    }

    fn evict_generation(&self, key: &CacheKey, generation: u64) {
        let mut state = self.inner.state.lock();
        let matches_generation = matches!(
            state.slots.get(key),
            Some(Slot::Pending { generation: g, .. }) if *g == generation
        );
        if matches_generation {
            state.slots.remove(key);
        }
    }
}
