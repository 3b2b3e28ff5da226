use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use tracing::warn;

use jobgate_core::traits::SequenceSource;

/// Uniform draw from 1..=999.
///
/// Two records created in the same year collide with probability about
/// 1/999 per pair. Nothing here detects or prevents that; use
/// [`CounterSequence`] or an external allocator when ids must be unique.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSequence;

impl SequenceSource for RandomSequence {
    fn next_sequence(&self, year: i32) -> u32 {
        let n = rand::thread_rng().gen_range(1..=999);
        warn!(year, sequence = n, "decision sequence drawn at random; uniqueness not guaranteed");
        n
    }
}

/// Monotonic counter seeded by the caller, e.g. from the last number their
/// store issued. Unique within one instance; the year is not tracked, so
/// reseed at year rollover.
#[derive(Debug)]
pub struct CounterSequence {
    next: AtomicU32,
}

impl CounterSequence {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }
}

impl Default for CounterSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl SequenceSource for CounterSequence {
    fn next_sequence(&self, _year: i32) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_stays_in_three_digit_range() {
        let seq = RandomSequence;
        for _ in 0..500 {
            let n = seq.next_sequence(2026);
            assert!((1..=999).contains(&n), "{n} out of range");
        }
    }

    #[test]
    fn counter_is_monotonic() {
        let seq = CounterSequence::starting_at(41);
        assert_eq!(seq.next_sequence(2026), 41);
        assert_eq!(seq.next_sequence(2026), 42);
        assert_eq!((&seq).next_sequence(2026), 43);
    }

    #[test]
    fn counter_is_unique_across_threads() {
        let seq = CounterSequence::default();
        let mut all: Vec<u32> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..100).map(|_| seq.next_sequence(2026)).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
