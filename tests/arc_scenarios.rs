// ==============================================
// ADAPTIVE REPLACEMENT SCENARIOS (integration)
// ==============================================
//
// End-to-end traces through the public ArcCache API: ghost recovery,
// scan resistance against LRU, and long randomized runs that check the
// byte accounting after every call.

use bytecache::policy::arc::{ArcCache, ListKind};
use bytecache::policy::lru::LruStore;
use bytecache::traits::ByteCache;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn key(s: &str) -> String {
    s.to_string()
}

/// Ten bytes: two-byte key plus eight-byte value.
fn value() -> Vec<u8> {
    vec![b'.'; 8]
}

// ==============================================
// Ghost Recovery
// ==============================================

#[test]
fn evicted_key_is_tracked_then_reinstated() {
    let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(30);
    for i in 0..3 {
        let k = format!("____{}", i);
        cache.set(k.clone(), k.into_bytes());
    }
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.remaining_storage(), 0);

    cache.set(key("____3"), b"____3".to_vec());
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.location(&key("____0")), Some(ListKind::B1));
    assert_eq!(cache.peek(&key("____0")), None);

    cache.set(key("____0"), b"____0".to_vec());
    assert_eq!(cache.location(&key("____0")), Some(ListKind::T2));
    assert_eq!(cache.peek(&key("____0")), Some(&b"____0".to_vec()));
    assert!(cache.p_value() > 0);
    assert_eq!(cache.len(), 3);
}

#[test]
fn get_on_ghost_only_counts_a_diagnostic_hit() {
    let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(20);
    cache.set(key("k1"), value());
    cache.get(&key("k1"));
    cache.set(key("k2"), value());
    cache.get(&key("k2"));
    // T2 is full of k2, k1; the cold insert demotes k1 to B2.
    cache.set(key("k3"), value());
    assert_eq!(cache.location(&key("k1")), Some(ListKind::B2));

    assert_eq!(cache.get(&key("k1")), None);
    let stats = cache.stats();
    assert_eq!(stats.b2_hits, 1);
    assert_eq!(stats.b1_hits, 0);
    assert_eq!(stats.misses, 1);
    assert_eq!(cache.location(&key("k1")), Some(ListKind::B2));
}

// ==============================================
// Scan Resistance
// ==============================================

#[test]
fn frequent_set_survives_a_one_time_scan() {
    let mut arc: ArcCache<String, Vec<u8>> = ArcCache::new(100);
    let mut lru: LruStore<String, Vec<u8>> = LruStore::new(100);

    let hot: Vec<String> = (0..5).map(|i| format!("h{}", i)).collect();
    for k in &hot {
        arc.set(k.clone(), value());
        arc.get(k);
        lru.set(k.clone(), value());
        lru.get(k);
    }

    for i in 0..20 {
        let k = format!("{}{}", if i < 10 { 's' } else { 't' }, i % 10);
        arc.set(k.clone(), value());
        lru.set(k, value());
    }

    for k in &hot {
        assert_eq!(arc.location(k), Some(ListKind::T2), "{} left T2", k);
        assert!(!lru.contains(k), "{} survived the LRU scan", k);
    }
    assert_eq!(arc.used_storage(), 100);
}

// ==============================================
// Randomized Traces
// ==============================================

#[test]
fn random_trace_keeps_accounting_consistent() {
    let mut rng = SmallRng::seed_from_u64(0xA5C);
    let capacity = 512;
    let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(capacity);

    for step in 0..20_000 {
        let id: u32 = rng.random_range(0..96);
        let k = format!("key-{}", id);
        match rng.random_range(0..10) {
            0..=4 => {
                let len = rng.random_range(0..48);
                assert!(cache.set(k.clone(), vec![id as u8; len]), "step {}", step);
                assert!(cache.contains(&k), "step {}", step);
            },
            5..=7 => {
                cache.get(&k);
            },
            8 => {
                cache.remove(&k);
                assert_eq!(cache.location(&k), None, "step {}", step);
            },
            _ => {
                cache.peek(&k);
            },
        }

        assert!(cache.used_storage() <= capacity, "step {}", step);
        assert_eq!(
            cache.used_storage(),
            cache.t1_bytes() + cache.t2_bytes(),
            "step {}",
            step
        );
        assert_eq!(cache.len(), cache.t1_len() + cache.t2_len());
        assert!(cache.p_value() <= capacity);
        assert!(cache.b1_bytes() <= capacity && cache.b2_bytes() <= capacity);
    }
}

#[test]
fn every_key_lives_in_at_most_one_list() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(200);
    let keys: Vec<String> = (0..40).map(|i| format!("k{}", i)).collect();

    for _ in 0..5_000 {
        let k = &keys[rng.random_range(0..keys.len())];
        if rng.random_bool(0.6) {
            cache.set(k.clone(), vec![0; rng.random_range(0..30)]);
        } else {
            cache.get(k);
        }
    }

    let mut counts = [0usize; 4];
    for k in &keys {
        match cache.location(k) {
            Some(ListKind::T1) => counts[0] += 1,
            Some(ListKind::T2) => counts[1] += 1,
            Some(ListKind::B1) => counts[2] += 1,
            Some(ListKind::B2) => counts[3] += 1,
            None => {},
        }
    }
    assert_eq!(counts[0], cache.t1_len());
    assert_eq!(counts[1], cache.t2_len());
    assert_eq!(counts[2], cache.b1_len());
    assert_eq!(counts[3], cache.b2_len());
}
