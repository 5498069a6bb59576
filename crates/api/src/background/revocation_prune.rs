//! Periodic pruning of the refresh-token blacklist.
//!
//! Once a revoked token's own expiry passes it fails validation regardless,
//! so its revocation record can go.

use std::sync::Arc;
use std::time::Duration;

use aula_core::auth::store::RevocationStore;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Run the pruning loop every `interval` until `cancel` is triggered.
pub async fn run(store: Arc<dyn RevocationStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Revocation prune job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Revocation prune job stopping");
                break;
            }
            _ = ticker.tick() => {
                prune_once(store.as_ref()).await;
            }
        }
    }
}

/// Single pruning pass. Failures are logged and retried on the next tick.
pub async fn prune_once(store: &dyn RevocationStore) -> u64 {
    match store.prune_expired(Utc::now()).await {
        Ok(deleted) => {
            if deleted > 0 {
                tracing::info!(deleted, "Revocation prune: removed expired entries");
            } else {
                tracing::debug!("Revocation prune: nothing to remove");
            }
            deleted
        }
        Err(e) => {
            tracing::error!(error = %e, "Revocation prune: cleanup failed");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use aula_core::auth::memory::MemoryRevocationStore;
    use chrono::Duration as ChronoDuration;

    use super::*;

    #[tokio::test]
    async fn prune_once_removes_expired_entries() {
        let store = MemoryRevocationStore::new();
        let now = Utc::now();
        store
            .revoke("expired", now - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store
            .revoke("live", now + ChronoDuration::days(1))
            .await
            .unwrap();

        assert_eq!(prune_once(&store).await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn run_stops_when_cancelled() {
        let store: Arc<dyn RevocationStore> = Arc::new(MemoryRevocationStore::new());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(store, Duration::from_secs(3600), cancel.clone()));

        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("job should stop promptly")
            .expect("job should not panic");
    }
}
