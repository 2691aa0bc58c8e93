//! Per pull request locks.
//!
//! Every read-modify-write of a PR's reviewer list runs while holding the
//! lock of that PR, so two reassignments of the same PR cannot both read the
//! old list and overwrite each other. Different PRs never contend.
//!
//! An entry lives only as long as someone holds or waits for it: the last
//! guard to drop removes it from the map.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

#[derive(Debug, Default)]
pub(crate) struct PrLocks {
    locks: Mutex<LockMap>,
}

impl PrLocks {
    fn map(&self) -> MutexGuard<'_, LockMap> {
        // The map holds no invariant a panicking holder could break.
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_or_create(&self, pr_id: &str) -> Arc<AsyncMutex<()>> {
        self.map()
            .entry(pr_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Waits for exclusive access to `pr_id`. The lock is released when the
    /// guard is dropped.
    pub(crate) async fn acquire(&self, pr_id: &str) -> PrLockGuard<'_> {
        let guard = self.get_or_create(pr_id).lock_owned().await;
        PrLockGuard {
            locks: self,
            pr_id: pr_id.to_string(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map().len()
    }
}

/// Exclusive access to one PR.
#[derive(Debug)]
pub(crate) struct PrLockGuard<'a> {
    locks: &'a PrLocks,
    pr_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PrLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Only the map still points at the mutex: nobody holds or awaits it.
        if map
            .get(&self.pr_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.pr_id);
        }
    }
}
