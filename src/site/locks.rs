//! Per-key async locks
//!
//! The RSVP upsert is search-then-write against a store without
//! transactions. Holding a lock for the normalized email while the two calls
//! run keeps submissions from this process from interleaving. Other
//! processes writing to the same table can still race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

/// Held while the keyed section runs; releases (and prunes) on drop
pub struct KeyGuard {
    key: String,
    locks: KeyedLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyGuard {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(key.to_string()).or_default().clone()
        };
        let guard = mutex.lock_owned().await;
        KeyGuard {
            key: key.to_string(),
            locks: self.clone(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently tracked
    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut map = self.locks.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map still references the mutex: nobody holds or waits on it
        if map.get(&self.key).is_some_and(|m| Arc::strong_count(m) == 1) {
            map.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_serialized() {
        let locks = KeyedLocks::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = locks.lock("a@x.com").await;

        let waiter = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _g = locks.lock("a@x.com").await;
                order.lock().unwrap().push("second");
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        order.lock().unwrap().push("first");
        drop(first);
        waiter.await.unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.lock("b")).await;
        assert!(b.is_ok());
    }
}
