use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::store::{FaqStore, StoreError};
use crate::models::Faq;

/// Snapshot cache of the FAQ collection
///
/// Every chat request needs the full candidate list, so it is kept as one
/// shared `Arc<Vec<Faq>>`. Admin mutations call [`FaqCache::invalidate`];
/// the TTL bounds staleness when the table is edited outside the service.
///
/// Snapshots are keyed by a generation number. Invalidation bumps the
/// generation, so a load still running from before a write can only land
/// under a key no reader asks for again.
#[derive(Clone)]
pub struct FaqCache {
    snapshot: Cache<u64, Arc<Vec<Faq>>>,
    generation: Arc<AtomicU64>,
}

impl FaqCache {
    pub fn new(ttl: Duration) -> Self {
        let snapshot = Cache::builder()
            .max_capacity(4)
            .time_to_live(ttl)
            .build();

        Self {
            snapshot,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current snapshot, loading it from the store on a miss
    ///
    /// Concurrent misses within one generation share a single load.
    pub async fn candidates(&self, store: &dyn FaqStore) -> Result<Arc<Vec<Faq>>, Arc<StoreError>> {
        let generation = self.generation.load(Ordering::Acquire);

        self.snapshot
            .try_get_with(generation, async {
                let faqs = store.list_faqs().await?;
                tracing::debug!("Cached {} FAQ candidates (generation {})", faqs.len(), generation);
                Ok::<_, StoreError>(Arc::new(faqs))
            })
            .await
    }

    pub async fn invalidate(&self) {
        let previous = self.generation.fetch_add(1, Ordering::AcqRel);
        self.snapshot.invalidate_all();
        tracing::trace!("FAQ snapshot invalidated (generation {})", previous + 1);
    }
}
