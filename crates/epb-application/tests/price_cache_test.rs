//! Price cache tests
//!
//! TTL behavior runs under tokio's paused clock so expiry is exercised
//! deterministically.

use epb_application::PriceCache;
use epb_domain::Error;
use epb_domain::entities::{InvalidationScope, PriceBreakdown};
use std::time::Duration;

fn plans(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn price(plan: &str) -> PriceBreakdown {
    PriceBreakdown::new(plan, 100.0, "USD")
}

#[test]
fn test_key_is_order_independent() {
    let cache = PriceCache::new();
    let forward = cache.generate_key("t1", &plans(&["plan-a", "plan-b"])).unwrap();
    let reversed = cache.generate_key("t1", &plans(&["plan-b", "plan-a"])).unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn test_key_format() {
    let cache = PriceCache::new();
    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();

    let mut parts = key.split(':');
    assert_eq!(parts.next(), Some("erp-prices"));
    assert_eq!(parts.next(), Some("t1"));
    let digest = parts.next().unwrap();
    assert_eq!(digest.len(), 16);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(parts.next(), None);
}

#[test]
fn test_keys_isolate_tenants() {
    let cache = PriceCache::new();
    let ids = plans(&["plan-a", "plan-b"]);
    let t1 = cache.generate_key("t1", &ids).unwrap();
    let t2 = cache.generate_key("t2", &ids).unwrap();
    assert_ne!(t1, t2);
}

#[test]
fn test_key_does_not_deduplicate_plans() {
    let cache = PriceCache::new();
    let single = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    let doubled = cache.generate_key("t1", &plans(&["plan-a", "plan-a"])).unwrap();
    assert_ne!(single, doubled);
}

#[test]
fn test_empty_plan_list_fails_fast() {
    let cache = PriceCache::new();
    let result = cache.generate_key("t1", &[]);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_miss_on_absent_key() {
    let cache = PriceCache::new();
    assert!(cache.get("erp-prices:t1:0000000000000000").is_none());

    let stats = cache.statistics();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.evictions, 0);
}

#[tokio::test(start_paused = true)]
async fn test_entry_live_until_ttl_elapses() {
    let cache = PriceCache::new();
    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");

    assert!(cache.get(&key).is_some());

    // Exactly at the TTL boundary the entry is still live.
    tokio::time::advance(Duration::from_secs(60)).await;
    assert!(cache.get(&key).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_expiry_counts_one_eviction() {
    let cache = PriceCache::new();
    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");
    assert!(cache.get(&key).is_some());

    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(cache.get(&key).is_none());

    let stats = cache.statistics();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.evictions, 1);
    assert_eq!(cache.len(), 0);

    // The expired entry was removed; a second read is a plain miss.
    assert!(cache.get(&key).is_none());
    assert_eq!(cache.statistics().evictions, 1);
}

#[test]
fn test_set_overwrites_without_merging() {
    let cache = PriceCache::new();
    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();

    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");
    assert!(cache.get(&key).is_some());
    assert_eq!(cache.statistics().total_hits_across_entries, 1);

    // Overwriting resets the per-entry hit count.
    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");
    assert_eq!(cache.statistics().total_hits_across_entries, 0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_hit_rate_consistency() {
    let cache = PriceCache::new();

    let stats = cache.statistics();
    assert_eq!(stats.hit_rate, 0.0);
    assert_eq!(stats.miss_rate, 0.0);

    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");

    // 3 hits, 2 misses.
    for _ in 0..3 {
        assert!(cache.get(&key).is_some());
    }
    for _ in 0..2 {
        assert!(cache.get("erp-prices:t1:ffffffffffffffff").is_none());
    }

    let stats = cache.statistics();
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hit_rate, 3.0 / 5.0);
    assert_eq!(stats.miss_rate, 2.0 / 5.0);
    assert_eq!(stats.total_hits_across_entries, 3);
}

#[tokio::test(start_paused = true)]
async fn test_oldest_entry_age() {
    let cache = PriceCache::new();
    assert!(cache.statistics().oldest_entry_age_secs.is_none());

    let first = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    cache.set(&first, vec![price("plan-a")], Duration::from_secs(600), "t1");

    tokio::time::advance(Duration::from_secs(30)).await;
    let second = cache.generate_key("t1", &plans(&["plan-b"])).unwrap();
    cache.set(&second, vec![price("plan-b")], Duration::from_secs(600), "t1");

    assert_eq!(cache.statistics().oldest_entry_age_secs, Some(30));
}

#[test]
fn test_tenant_scoped_invalidation() {
    let cache = PriceCache::new();
    let a1 = cache.generate_key("tenant-a", &plans(&["plan-1"])).unwrap();
    let a2 = cache.generate_key("tenant-a", &plans(&["plan-2"])).unwrap();
    let b1 = cache.generate_key("tenant-b", &plans(&["plan-1"])).unwrap();
    cache.set(&a1, vec![price("plan-1")], Duration::from_secs(60), "tenant-a");
    cache.set(&a2, vec![price("plan-2")], Duration::from_secs(60), "tenant-a");
    cache.set(&b1, vec![price("plan-1")], Duration::from_secs(60), "tenant-b");

    let removed = cache
        .invalidate(&InvalidationScope::Tenant("tenant-a".to_string()))
        .unwrap();
    assert_eq!(removed, 2);

    assert!(cache.get(&a1).is_none());
    assert!(cache.get(&a2).is_none());
    assert!(cache.get(&b1).is_some());
    assert_eq!(cache.statistics().evictions, 2);
}

#[test]
fn test_global_invalidation_returns_prior_count() {
    let cache = PriceCache::new();
    for tenant in ["tenant-a", "tenant-b", "tenant-c"] {
        let key = cache.generate_key(tenant, &plans(&["plan-1"])).unwrap();
        cache.set(&key, vec![price("plan-1")], Duration::from_secs(60), tenant);
    }

    let removed = cache.invalidate(&InvalidationScope::All).unwrap();
    assert_eq!(removed, 3);
    assert!(cache.is_empty());
}

#[test]
fn test_exact_entry_invalidation() {
    let cache = PriceCache::new();
    let target = cache.generate_key("t1", &plans(&["plan-a", "plan-b"])).unwrap();
    let other = cache.generate_key("t1", &plans(&["plan-c"])).unwrap();
    cache.set(&target, vec![price("plan-a")], Duration::from_secs(60), "t1");
    cache.set(&other, vec![price("plan-c")], Duration::from_secs(60), "t1");

    // Plan order in the scope does not matter, the same key is derived.
    let removed = cache
        .invalidate(&InvalidationScope::Entry {
            tenant_id: "t1".to_string(),
            plan_ids: plans(&["plan-b", "plan-a"]),
        })
        .unwrap();
    assert_eq!(removed, 1);
    assert!(cache.get(&target).is_none());
    assert!(cache.get(&other).is_some());

    // Removing an absent entry is a zero-count success.
    let removed = cache
        .invalidate(&InvalidationScope::Entry {
            tenant_id: "t1".to_string(),
            plan_ids: plans(&["plan-a", "plan-b"]),
        })
        .unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_removes_exactly_the_expired() {
    let cache = PriceCache::new();

    // 4 entries with a short TTL, 6 with a long one.
    for i in 0..4 {
        let key = cache
            .generate_key("t1", &[format!("short-{i}")])
            .unwrap();
        cache.set(&key, vec![price("short")], Duration::from_secs(30), "t1");
    }
    let mut long_keys = Vec::new();
    for i in 0..6 {
        let key = cache
            .generate_key("t1", &[format!("long-{i}")])
            .unwrap();
        cache.set(&key, vec![price("long")], Duration::from_secs(3600), "t1");
        long_keys.push(key);
    }

    // Hit every live entry once so sweep can be shown to preserve counts.
    for key in &long_keys {
        assert!(cache.get(key).is_some());
    }

    tokio::time::advance(Duration::from_secs(31)).await;
    let removed = cache.sweep_expired();
    assert_eq!(removed, 4);
    assert_eq!(cache.len(), 6);

    let stats = cache.statistics();
    assert_eq!(stats.evictions, 4);
    assert_eq!(stats.total_hits_across_entries, 6);
    for key in &long_keys {
        assert!(cache.get(key).is_some());
    }
}

#[test]
fn test_reset_clears_entries_and_counters() {
    let cache = PriceCache::new();
    let key = cache.generate_key("t1", &plans(&["plan-a"])).unwrap();
    cache.set(&key, vec![price("plan-a")], Duration::from_secs(60), "t1");
    assert!(cache.get(&key).is_some());
    assert!(cache.get("erp-prices:t1:ffffffffffffffff").is_none());

    cache.reset();

    assert!(cache.is_empty());
    let stats = cache.statistics();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 0);
    assert!(stats.oldest_entry_age_secs.is_none());
}
