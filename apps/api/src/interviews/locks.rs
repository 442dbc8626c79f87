use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-interview writer locks: at most one in-flight answer mutation per
/// interview id. Readers are unaffected.
#[derive(Clone, Default)]
pub struct InterviewLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl InterviewLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, interview_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(interview_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Frees the registry entry once the interview can no longer be written.
    pub async fn forget(&self, interview_id: Uuid) {
        self.inner.lock().await.remove(&interview_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_writer_waits_for_first() {
        let locks = InterviewLocks::new();
        let id = Uuid::new_v4();

        let guard = locks.acquire(id).await;
        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(blocked.is_err(), "second acquire should block while held");

        drop(guard);
        let unblocked = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(unblocked.is_ok());
    }

    #[tokio::test]
    async fn test_distinct_interviews_do_not_contend() {
        let locks = InterviewLocks::new();
        let _first = locks.acquire(Uuid::new_v4()).await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(Uuid::new_v4())).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_forget_releases_registry_entry() {
        let locks = InterviewLocks::new();
        let id = Uuid::new_v4();
        drop(locks.acquire(id).await);
        locks.forget(id).await;
        // Re-acquiring after forget creates a fresh entry.
        let guard = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(guard.is_ok());
    }
}
