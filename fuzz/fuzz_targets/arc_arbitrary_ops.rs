#![no_main]

use bytecache::policy::arc::ArcCache;
use bytecache::traits::ByteCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on ArcCache
//
// The first byte picks the byte budget; each following pair is
// (op, argument). Set sizes come from the argument so oversized bindings,
// ghost hits and pruning are all reachable.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap);
    let mut cache: ArcCache<Vec<u8>, Vec<u8>> = ArcCache::new(capacity);

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        let key = vec![b'k', arg % 24];
        match op % 6 {
            0 | 1 => {
                let len = usize::from(arg >> 2);
                let fits = key.len() + len <= capacity;
                assert_eq!(cache.set(key.clone(), vec![arg; len]), fits);
                if fits {
                    assert_eq!(cache.peek(&key), Some(&vec![arg; len]));
                }
            },
            2 | 3 => {
                let before = cache.stats().lookups();
                cache.get(&key);
                assert_eq!(cache.stats().lookups(), before + 1);
            },
            4 => {
                cache.remove(&key);
                assert!(cache.location(&key).is_none());
            },
            _ => {
                let stats = cache.stats();
                cache.peek(&key);
                assert_eq!(cache.stats(), stats);
            },
        }

        assert!(cache.used_storage() <= capacity);
        assert_eq!(cache.used_storage(), cache.t1_bytes() + cache.t2_bytes());
        assert!(cache.p_value() <= capacity);
        cache.debug_validate_invariants();
    }
});
