// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-task lock registry.
//!
//! Mutating operations on a task (criteria toggles, submissions, progress
//! overrides) must be mutually exclusive for that task id: a handler
//! holds the task's lock across its load, apply, and persist steps so no
//! submission append is lost and no stale progress computation overwrites
//! a newer one. Operations on distinct tasks proceed independently, and
//! read operations never take a task lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A registry of per-task async locks.
///
/// Cloning the registry shares the underlying lock map.
#[derive(Clone, Default)]
pub struct TaskLocks {
    inner: Arc<StdMutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl TaskLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one task id, waiting if another mutation on
    /// the same task is in flight.
    ///
    /// The returned guard releases the lock on drop.
    pub async fn acquire(&self, task_id: i64) -> OwnedMutexGuard<()> {
        let lock: Arc<Mutex<()>> = {
            let mut map = match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            Arc::clone(map.entry(task_id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_task_is_mutually_exclusive() {
        let locks: TaskLocks = TaskLocks::new();

        let guard = locks.acquire(1).await;

        // A second acquire on the same task must wait.
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(1)).await;
        assert!(second.is_err());

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire(1)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn test_distinct_tasks_do_not_block_each_other() {
        let locks: TaskLocks = TaskLocks::new();

        let _guard = locks.acquire(1).await;
        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire(2)).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_the_same_locks() {
        let locks: TaskLocks = TaskLocks::new();
        let clone: TaskLocks = locks.clone();

        let _guard = locks.acquire(7).await;
        let contended = tokio::time::timeout(Duration::from_millis(50), clone.acquire(7)).await;
        assert!(contended.is_err());
    }
}
