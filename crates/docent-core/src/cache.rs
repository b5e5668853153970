//! In-memory cache of extracted document text.
//!
//! Entries are derived data: dropping any of them is always safe because the
//! text can be extracted again from the stored PDF.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Thread-safe mapping from document id to extracted text.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone, Default)]
pub struct DocumentCache {
    entries: Arc<RwLock<HashMap<i64, Arc<str>>>>,
    /// Per-id gates so only one extraction runs for an uncached id.
    inflight: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl DocumentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached text for a document.
    pub async fn get(&self, id: i64) -> Option<Arc<str>> {
        self.entries.read().await.get(&id).cloned()
    }

    /// Store text for a document, replacing any previous entry.
    pub async fn put(&self, id: i64, text: impl Into<Arc<str>>) {
        self.entries.write().await.insert(id, text.into());
    }

    /// Remove a document's entry. Returns whether one was present.
    pub async fn delete(&self, id: i64) -> bool {
        self.entries.write().await.remove(&id).is_some()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Return the cached text, or run `load` once and cache its result.
    ///
    /// Concurrent callers for the same uncached id wait for the first
    /// caller's `load` instead of running their own. Errors are not cached;
    /// the next caller retries.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, id: i64, load: F) -> Result<Arc<str>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(text) = self.get(id).await {
            debug!(document_id = id, "Document text cache hit");
            return Ok(text);
        }

        let gate = self.acquire_gate(id).await;

        let result = {
            let _turn = gate.lock().await;
            match self.get(id).await {
                Some(text) => Ok(text),
                None => match load().await {
                    Ok(text) => {
                        let text: Arc<str> = Arc::from(text);
                        self.put(id, text.clone()).await;
                        Ok(text)
                    }
                    Err(e) => Err(e),
                },
            }
        };

        self.release_gate(id, gate).await;
        result
    }

    /// Remove a document's entry once any in-flight load for it has finished.
    ///
    /// Unlike [`delete`](Self::delete), a load that started before this call
    /// cannot put the entry back afterwards.
    pub async fn invalidate(&self, id: i64) -> bool {
        let gate = self.acquire_gate(id).await;
        let removed = {
            let _turn = gate.lock().await;
            self.delete(id).await
        };
        self.release_gate(id, gate).await;
        removed
    }

    async fn acquire_gate(&self, id: i64) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().await;
        inflight.entry(id).or_default().clone()
    }

    // Gates are released under the map lock, so the last holder sees a
    // count of one and removes the entry.
    async fn release_gate(&self, id: i64, gate: Arc<Mutex<()>>) {
        let mut inflight = self.inflight.lock().await;
        drop(gate);
        if inflight.get(&id).is_some_and(|g| Arc::strong_count(g) == 1) {
            inflight.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_get_put_delete() {
        let cache = DocumentCache::new();
        assert!(cache.get(1).await.is_none());

        cache.put(1, "first").await;
        assert_eq!(cache.get(1).await.as_deref(), Some("first"));

        cache.put(1, "second").await;
        assert_eq!(cache.get(1).await.as_deref(), Some("second"));
        assert_eq!(cache.len().await, 1);

        assert!(cache.delete(1).await);
        assert!(!cache.delete(1).await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = DocumentCache::new();
        let other = cache.clone();
        cache.put(7, "shared").await;
        assert_eq!(other.get(7).await.as_deref(), Some("shared"));

        other.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_insert_uses_cached_value() {
        let cache = DocumentCache::new();
        cache.put(3, "cached").await;

        let text = cache
            .get_or_try_insert_with(3, || async { Err::<String, &str>("should not load") })
            .await
            .unwrap();
        assert_eq!(&*text, "cached");
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = DocumentCache::new();

        let result = cache
            .get_or_try_insert_with(4, || async { Err::<String, &str>("broken") })
            .await;
        assert_eq!(result.unwrap_err(), "broken");
        assert!(cache.get(4).await.is_none());

        let text = cache
            .get_or_try_insert_with(4, || async { Ok::<_, &str>("fixed".to_string()) })
            .await
            .unwrap();
        assert_eq!(&*text, "fixed");
    }

    #[tokio::test]
    async fn test_concurrent_loads_run_once() {
        let cache = DocumentCache::new();
        let loads = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let loads = loads.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_try_insert_with(9, || async move {
                        loads.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, std::convert::Infallible>("extracted".to_string())
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(&*handle.await.unwrap(), "extracted");
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.inflight.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_waits_for_inflight_load() {
        let cache = DocumentCache::new();
        let release = Arc::new(tokio::sync::Notify::new());

        let loader = {
            let cache = cache.clone();
            let release = release.clone();
            tokio::spawn(async move {
                cache
                    .get_or_try_insert_with(5, || async move {
                        release.notified().await;
                        Ok::<_, std::convert::Infallible>("stale".to_string())
                    })
                    .await
            })
        };
        // Let the loader take the gate before invalidating.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let invalidating = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.invalidate(5).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        release.notify_one();

        loader.await.unwrap().unwrap();
        assert!(invalidating.await.unwrap());
        assert!(cache.get(5).await.is_none());
        assert!(cache.inflight.lock().await.is_empty());
    }
}
