//! Per-tenant cache with explicit version invalidation.
//!
//! # Responsibilities
//! - Hold one compiled entry per tenant (route table, catalog, handlers)
//! - Serve an entry only while its version matches the current version
//! - Bump versions on admin edits or data reloads
//!
//! # Design Decisions
//! - No time-based expiry: a stale route table is never served after a bump
//! - Two counters: global (catalog/data reload) and per tenant
//! - Version is read before the build, so a bump during a build leaves the
//!   inserted entry stale rather than hiding the change

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use crate::observability::metrics;

/// Version stamp of a cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheVersion {
    pub global: u64,
    pub tenant: u64,
}

/// Snapshot of cache counters for the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub cached_tenants: usize,
    /// Tenants with a bumped version counter.
    pub versioned_tenants: usize,
    pub global_version: u64,
}

struct Entry<T> {
    version: CacheVersion,
    value: Arc<T>,
}

/// Concurrent cache keyed by tenant id.
pub struct SiteCache<T> {
    entries: DashMap<String, Entry<T>>,
    tenant_versions: DashMap<String, u64>,
    global_version: AtomicU64,
    enabled: bool,
}

impl<T> SiteCache<T> {
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: DashMap::new(),
            tenant_versions: DashMap::new(),
            global_version: AtomicU64::new(0),
            enabled,
        }
    }

    /// Current version for a tenant.
    pub fn current_version(&self, tenant_id: &str) -> CacheVersion {
        CacheVersion {
            global: self.global_version.load(Ordering::Acquire),
            tenant: self.tenant_versions.get(tenant_id).map(|v| *v).unwrap_or(0),
        }
    }

    /// Fetch a fresh entry. Stale entries are dropped.
    pub fn get(&self, tenant_id: &str) -> Option<Arc<T>> {
        if !self.enabled {
            return None;
        }

        let current = self.current_version(tenant_id);
        let hit = self
            .entries
            .get(tenant_id)
            .filter(|entry| entry.version == current)
            .map(|entry| entry.value.clone());

        match hit {
            Some(value) => {
                metrics::record_cache_event("hit");
                Some(value)
            }
            None => {
                self.entries
                    .remove_if(tenant_id, |_, entry| entry.version != current);
                metrics::record_cache_event("miss");
                None
            }
        }
    }

    /// Store an entry built against `version`.
    pub fn insert(&self, tenant_id: &str, version: CacheVersion, value: Arc<T>) {
        if self.enabled {
            self.entries
                .insert(tenant_id.to_string(), Entry { version, value });
        }
    }

    /// Invalidate one tenant. Returns the new tenant version.
    pub fn invalidate_tenant(&self, tenant_id: &str) -> u64 {
        let mut version = self.tenant_versions.entry(tenant_id.to_string()).or_insert(0);
        *version += 1;
        let new_version = *version;
        drop(version);

        self.entries.remove(tenant_id);
        metrics::record_cache_event("invalidate_tenant");
        tracing::info!(tenant = %tenant_id, version = new_version, "Tenant cache invalidated");
        new_version
    }

    /// Invalidate every tenant. Returns the new global version.
    pub fn invalidate_all(&self) -> u64 {
        let new_version = self.global_version.fetch_add(1, Ordering::AcqRel) + 1;
        self.entries.clear();
        metrics::record_cache_event("invalidate_all");
        tracing::info!(version = new_version, "Global cache invalidated");
        new_version
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.enabled,
            cached_tenants: self.entries.len(),
            versioned_tenants: self.tenant_versions.len(),
            global_version: self.global_version.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_until_invalidated() {
        let cache: SiteCache<&str> = SiteCache::new(true);
        let version = cache.current_version("acme");
        cache.insert("acme", version, Arc::new("table-v0"));

        assert_eq!(cache.get("acme").as_deref(), Some(&"table-v0"));

        assert_eq!(cache.invalidate_tenant("acme"), 1);
        assert!(cache.get("acme").is_none());
        assert_eq!(cache.current_version("acme").tenant, 1);
    }

    #[test]
    fn test_build_racing_a_bump_is_stale() {
        let cache: SiteCache<u32> = SiteCache::new(true);
        let version = cache.current_version("acme");

        // Admin edit lands while the entry is being built.
        cache.invalidate_all();
        cache.insert("acme", version, Arc::new(1));

        assert!(cache.get("acme").is_none());
        assert_eq!(cache.stats().cached_tenants, 0);
    }

    #[test]
    fn test_disabled_cache_never_hits() {
        let cache: SiteCache<u32> = SiteCache::new(false);
        let version = cache.current_version("acme");
        cache.insert("acme", version, Arc::new(1));
        assert!(cache.get("acme").is_none());
    }

    #[test]
    fn test_tenant_isolation() {
        let cache: SiteCache<u32> = SiteCache::new(true);
        cache.insert("a", cache.current_version("a"), Arc::new(1));
        cache.insert("b", cache.current_version("b"), Arc::new(2));

        cache.invalidate_tenant("a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").as_deref(), Some(&2));
    }
}
