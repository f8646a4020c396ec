//! Small xorshift generator behind a thread-local, seeded once from the
//! platform (browser crypto on wasm via getrandom's `js` feature, OS
//! entropy under native tests). Not crypto secure; board shuffles and
//! sparkle jitter only.

use std::cell::Cell;

thread_local! {
    static STATE: Cell<u64> = Cell::new(seed());
}

fn seed() -> u64 {
    let mut bytes = [0u8; 8];
    let _ = getrandom::getrandom(&mut bytes);
    // Xorshift must not start at zero.
    u64::from_le_bytes(bytes) | 1
}

fn next() -> u64 {
    STATE.with(|s| {
        let mut x = s.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        s.set(x);
        x
    })
}

/// Uniform-ish index in `0..len` (modulo bias is negligible at board sizes).
pub fn index(len: usize) -> usize {
    if len == 0 { 0 } else { (next() % len as u64) as usize }
}

/// Uniform float in `[0, 1)`.
pub fn unit() -> f64 {
    (next() >> 11) as f64 / (1u64 << 53) as f64
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..32).collect();
        shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn unit_stays_in_range() {
        for _ in 0..1000 {
            let v = unit();
            assert!((0.0..1.0).contains(&v), "unit() out of range: {v}");
        }
    }

    #[test]
    fn index_respects_bounds() {
        assert_eq!(index(0), 0);
        for _ in 0..1000 {
            assert!(index(6) < 6);
        }
    }
}
