//! Tenant-scoped price cache
//!
//! In-process cache mapping a deterministic fingerprint (tenant + requested
//! plan set) to a cached pricing result, with per-entry TTL, lazy expiry on
//! read, hit/miss/eviction statistics, and tenant-scoped or global
//! invalidation.
//!
//! The entry map and the statistics counters share one mutex: every
//! read-check-expire-write sequence on a key is a single critical section,
//! so evictions are never double-counted under concurrent access.
//!
//! Entries carry their insertion time as [`tokio::time::Instant`], which
//! lets tests drive expiry with a paused clock.

use epb_domain::entities::{CacheStatistics, InvalidationScope, PriceBreakdown};
use epb_domain::error::{Error, Result};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Default namespace prepended to every cache key
pub const DEFAULT_CACHE_NAMESPACE: &str = "erp-prices";

/// Default TTL for cached pricing results (5 minutes)
pub const DEFAULT_PRICE_TTL_SECS: u64 = 300;

/// Hex characters kept from the plan-set digest
const KEY_DIGEST_LEN: usize = 16;

/// One cached pricing result
///
/// Owned exclusively by the cache; callers only ever see cloned data.
struct CacheEntry {
    data: Vec<PriceBreakdown>,
    inserted_at: Instant,
    ttl: Duration,
    hit_count: u64,
    tenant_id: String,
}

impl CacheEntry {
    /// An entry is live iff `now - inserted_at <= ttl`
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) > self.ttl
    }
}

/// Entry map and counters guarded together as one critical section
#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Tenant-scoped price cache with TTL eviction and statistics
///
/// Explicitly constructed and shared as `Arc<PriceCache>`; there is no
/// ambient global instance. All operations are synchronous and in-memory.
/// A miss is a normal return value, never an error.
///
/// # Example
///
/// ```
/// use epb_application::PriceCache;
/// use epb_domain::entities::PriceBreakdown;
/// use std::time::Duration;
///
/// let cache = PriceCache::new();
/// let plan_ids = vec!["plan-a".to_string(), "plan-b".to_string()];
/// let key = cache.generate_key("tenant-1", &plan_ids).unwrap();
///
/// cache.set(
///     &key,
///     vec![PriceBreakdown::new("plan-a", 120.0, "USD")],
///     Duration::from_secs(300),
///     "tenant-1",
/// );
/// assert!(cache.get(&key).is_some());
/// ```
pub struct PriceCache {
    namespace: String,
    state: Mutex<CacheState>,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

// Construction
impl PriceCache {
    /// Create a cache with the default key namespace
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_CACHE_NAMESPACE)
    }

    /// Create a cache with a custom key namespace
    pub fn with_namespace<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The key namespace this cache prepends to every key
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

// Key derivation
impl PriceCache {
    /// Derive the deterministic cache key for a tenant's plan set
    ///
    /// Format: `<namespace>:<tenant_id>:<16-hex-char digest>`, where the
    /// digest is SHA-256 over the lexicographically sorted, comma-joined
    /// plan ids, truncated to 16 hex characters. Identical (tenant, plan
    /// set) inputs yield the identical key regardless of input ordering;
    /// duplicates are not collapsed here, callers own set semantics.
    ///
    /// # Errors
    /// `InvalidArgument` when `plan_ids` is empty.
    pub fn generate_key(&self, tenant_id: &str, plan_ids: &[String]) -> Result<String> {
        if plan_ids.is_empty() {
            return Err(Error::invalid_argument(
                "plan id list for cache key derivation cannot be empty",
            ));
        }

        let mut sorted = plan_ids.to_vec();
        sorted.sort_unstable();

        let digest = Sha256::digest(sorted.join(",").as_bytes());
        let digest_hex = &hex::encode(digest)[..KEY_DIGEST_LEN];

        Ok(format!("{}:{}:{}", self.namespace, tenant_id, digest_hex))
    }
}

// Cache operations
impl PriceCache {
    /// Look up a cached pricing result
    ///
    /// Absent keys record a miss. Expired entries are removed on the spot,
    /// recording both a miss and an eviction. Live entries record a hit and
    /// bump the entry's own hit count.
    pub fn get(&self, key: &str) -> Option<Vec<PriceBreakdown>> {
        let now = Instant::now();
        let mut state = self.state.lock();

        let expired = match state.entries.get(key) {
            None => {
                state.misses += 1;
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            state.entries.remove(key);
            state.misses += 1;
            state.evictions += 1;
            return None;
        }

        let entry = state.entries.get_mut(key)?;
        entry.hit_count += 1;
        let data = entry.data.clone();
        state.hits += 1;
        Some(data)
    }

    /// Store a pricing result, unconditionally replacing any existing entry
    ///
    /// The new entry starts with a fresh insertion time and a zero hit
    /// count; there are no merge semantics.
    pub fn set(&self, key: &str, data: Vec<PriceBreakdown>, ttl: Duration, tenant_id: &str) {
        let entry = CacheEntry {
            data,
            inserted_at: Instant::now(),
            ttl,
            hit_count: 0,
            tenant_id: tenant_id.to_string(),
        };
        self.state.lock().entries.insert(key.to_string(), entry);
    }

    /// Remove entries matching a scope, counting each removal as an eviction
    ///
    /// Returns the number of entries actually removed.
    ///
    /// # Errors
    /// `InvalidArgument` when an `Entry` scope carries an empty plan set.
    pub fn invalidate(&self, scope: &InvalidationScope) -> Result<usize> {
        match scope {
            InvalidationScope::Entry {
                tenant_id,
                plan_ids,
            } => {
                let key = self.generate_key(tenant_id, plan_ids)?;
                let mut state = self.state.lock();
                let removed = usize::from(state.entries.remove(&key).is_some());
                state.evictions += removed as u64;
                Ok(removed)
            }
            InvalidationScope::Tenant(tenant_id) => {
                let mut state = self.state.lock();
                let before = state.entries.len();
                state.entries.retain(|_, entry| entry.tenant_id != *tenant_id);
                let removed = before - state.entries.len();
                state.evictions += removed as u64;
                Ok(removed)
            }
            InvalidationScope::All => {
                let mut state = self.state.lock();
                let removed = state.entries.len();
                state.entries.clear();
                state.evictions += removed as u64;
                Ok(removed)
            }
        }
    }

    /// Remove every expired entry, counting each removal as an eviction
    ///
    /// Safe to call manually at any time; the periodic background sweep
    /// calls the same operation.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - state.entries.len();

        state.evictions += removed as u64;
        removed
    }

    /// Snapshot the cache statistics, computed on demand from live state
    ///
    /// Entries that expired but have not yet been swept are excluded from
    /// the derived values without being evicted; observation does not
    /// mutate the cache.
    pub fn statistics(&self) -> CacheStatistics {
        let now = Instant::now();
        let state = self.state.lock();

        let mut live_entries = 0usize;
        let mut total_hits_across_entries = 0u64;
        let mut oldest_inserted_at: Option<Instant> = None;

        for entry in state.entries.values() {
            if entry.is_expired(now) {
                continue;
            }
            live_entries += 1;
            total_hits_across_entries += entry.hit_count;
            oldest_inserted_at = Some(match oldest_inserted_at {
                Some(oldest) => oldest.min(entry.inserted_at),
                None => entry.inserted_at,
            });
        }

        let lookups = state.hits + state.misses;
        let (hit_rate, miss_rate) = if lookups > 0 {
            (
                state.hits as f64 / lookups as f64,
                state.misses as f64 / lookups as f64,
            )
        } else {
            (0.0, 0.0)
        };

        CacheStatistics {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            entries: live_entries,
            hit_rate,
            miss_rate,
            oldest_entry_age_secs: oldest_inserted_at
                .map(|inserted| now.duration_since(inserted).as_secs()),
            total_hits_across_entries,
        }
    }

    /// Clear all entries and zero all counters
    ///
    /// Intended for test isolation, not production traffic.
    pub fn reset(&self) {
        *self.state.lock() = CacheState::default();
    }

    /// Number of stored entries, including expired-but-unswept ones
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether the cache holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl std::fmt::Debug for PriceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PriceCache")
            .field("namespace", &self.namespace)
            .field("entries", &state.entries.len())
            .field("hits", &state.hits)
            .field("misses", &state.misses)
            .field("evictions", &state.evictions)
            .finish()
    }
}
