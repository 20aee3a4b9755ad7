//
//  gocd-client
//  api/version/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Memoized server version.
//!
//! The cache is owned by a [`GocdClient`](crate::api::GocdClient) and shared
//! by all of its clones. Once populated the value is never re-fetched until
//! [`ServerVersionCache::invalidate`] is called. Two cold-start callers may
//! both fetch; the later write wins.

use std::sync::Arc;

use parking_lot::RwLock;

use super::ServerVersion;

#[derive(Debug, Clone, Default)]
pub struct ServerVersionCache {
    inner: Arc<RwLock<Option<Arc<ServerVersion>>>>,
}

impl ServerVersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached version, if one has been stored.
    pub fn get(&self) -> Option<Arc<ServerVersion>> {
        self.inner.read().clone()
    }

    /// Stores `version` and returns the shared handle now held by the cache.
    pub fn set(&self, version: ServerVersion) -> Arc<ServerVersion> {
        let version = Arc::new(version);
        *self.inner.write() = Some(Arc::clone(&version));
        version
    }

    /// Drops the cached value so the next lookup hits the server again.
    pub fn invalidate(&self) {
        *self.inner.write() = None;
    }

    pub fn is_populated(&self) -> bool {
        self.inner.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_invalidate() {
        let cache = ServerVersionCache::new();
        assert!(cache.get().is_none());

        let stored = cache.set(ServerVersion::from_version("19.1.0").unwrap());
        let fetched = cache.get().unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));

        cache.invalidate();
        assert!(!cache.is_populated());
    }

    #[test]
    fn test_clones_share_state() {
        let cache = ServerVersionCache::new();
        let other = cache.clone();
        cache.set(ServerVersion::from_version("18.8.0").unwrap());
        assert_eq!(other.get().unwrap().version, "18.8.0");

        other.invalidate();
        assert!(cache.get().is_none());
    }
}
