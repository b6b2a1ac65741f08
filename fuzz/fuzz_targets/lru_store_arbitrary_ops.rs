#![no_main]

use bytecache::policy::lru::LruStore;
use bytecache::traits::ByteCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LruStore
//
// Covers set (new, shrinking and growing overwrites), get, peek, remove,
// pop_lru and clear against a byte budget chosen by the first input byte.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap);
    let mut lru: LruStore<Vec<u8>, Vec<u8>> = LruStore::new(capacity);

    for pair in ops.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        let key = vec![arg % 16];
        match op % 7 {
            0 | 1 => {
                let len = usize::from(arg >> 3);
                let fits = key.len() + len <= capacity;
                assert_eq!(lru.set(key.clone(), vec![op; len]), fits);
            },
            2 => {
                let hit = lru.contains(&key);
                assert_eq!(lru.get(&key).is_some(), hit);
                if hit {
                    assert_eq!(lru.keys().next(), Some(&key));
                }
            },
            3 => {
                let _ = lru.peek(&key);
            },
            4 => {
                lru.remove(&key);
                assert!(!lru.contains(&key));
            },
            5 => {
                let before = lru.len();
                if lru.pop_lru().is_some() {
                    assert_eq!(lru.len(), before - 1);
                }
            },
            _ => {
                if arg == 0 {
                    lru.clear();
                    assert_eq!(lru.used_storage(), 0);
                }
            },
        }

        assert!(lru.used_storage() <= capacity);
        lru.debug_validate_invariants();
    }
});
