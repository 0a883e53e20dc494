use crate::schemes::domain::Scheme;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant, SystemTime};

/// How long a loaded catalog may be reused before the file is read again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Read the backing file on every request.
    #[default]
    Disabled,
    /// Reuse the last load while the file modification time is unchanged.
    ModifiedTime,
    /// Reuse the last load until it is older than the given duration.
    TimeToLive(Duration),
}

#[derive(Debug)]
struct CachedLoad {
    schemes: Arc<[Scheme]>,
    loaded_at: Instant,
    modified: Option<SystemTime>,
}

#[derive(Debug)]
pub(crate) struct CatalogCache {
    policy: CachePolicy,
    entry: Mutex<Option<CachedLoad>>,
}

impl CatalogCache {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entry: Mutex::new(None),
        }
    }

    pub(crate) fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the cached rows when they are still fresh for `modified`.
    pub(crate) fn fresh(&self, modified: Option<SystemTime>) -> Option<Arc<[Scheme]>> {
        let entry = self.lock();
        let cached = entry.as_ref()?;

        let fresh = match self.policy {
            CachePolicy::Disabled => false,
            CachePolicy::ModifiedTime => modified.is_some() && cached.modified == modified,
            CachePolicy::TimeToLive(ttl) => cached.loaded_at.elapsed() < ttl,
        };

        fresh.then(|| Arc::clone(&cached.schemes))
    }

    pub(crate) fn store(&self, schemes: Arc<[Scheme]>, modified: Option<SystemTime>) {
        if self.policy == CachePolicy::Disabled {
            return;
        }

        *self.lock() = Some(CachedLoad {
            schemes,
            loaded_at: Instant::now(),
            modified,
        });
    }

    pub(crate) fn invalidate(&self) {
        self.lock().take();
    }

    #[cfg(test)]
    pub(crate) fn is_populated(&self) -> bool {
        self.lock().is_some()
    }

    // Entries are replaced wholesale, so a poisoned guard still holds a whole entry.
    fn lock(&self) -> MutexGuard<'_, Option<CachedLoad>> {
        self.entry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::domain::SchemeId;

    fn rows(id: &str) -> Arc<[Scheme]> {
        Arc::from(vec![Scheme {
            scheme_id: SchemeId::from(id),
            ..Scheme::default()
        }])
    }

    #[test]
    fn disabled_policy_never_stores() {
        let cache = CatalogCache::new(CachePolicy::Disabled);
        cache.store(rows("S1"), None);

        assert!(!cache.is_populated());
        assert!(cache.fresh(None).is_none());
    }

    #[test]
    fn modified_time_policy_tracks_file_changes() {
        let cache = CatalogCache::new(CachePolicy::ModifiedTime);
        let first = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let second = SystemTime::UNIX_EPOCH + Duration::from_secs(200);

        cache.store(rows("S1"), Some(first));

        let hit = cache.fresh(Some(first)).expect("same mtime is a hit");
        assert_eq!(hit[0].scheme_id, SchemeId::from("S1"));
        assert!(cache.fresh(Some(second)).is_none());
        assert!(cache.fresh(None).is_none());
    }

    #[test]
    fn ttl_policy_expires_entries() {
        let cache = CatalogCache::new(CachePolicy::TimeToLive(Duration::ZERO));
        cache.store(rows("S1"), None);
        assert!(cache.fresh(None).is_none());

        let cache = CatalogCache::new(CachePolicy::TimeToLive(Duration::from_secs(3600)));
        cache.store(rows("S1"), None);
        assert!(cache.fresh(None).is_some());
    }

    #[test]
    fn invalidate_drops_entry() {
        let cache = CatalogCache::new(CachePolicy::TimeToLive(Duration::from_secs(3600)));
        cache.store(rows("S1"), None);
        cache.invalidate();

        assert!(!cache.is_populated());
        assert!(cache.fresh(None).is_none());
    }
}
