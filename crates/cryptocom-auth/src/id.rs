//! Request id sources
//!
//! The exchange echoes the id back in the response. Ids stay below 2^53 so
//! they survive a round trip through any JSON number parser.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest id that is exact in an IEEE-754 double
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// Produces request ids
pub trait IdGenerator: Send + Sync {
    /// Next id
    fn next_id(&self) -> u64;
}

/// Sequential ids starting at 1
#[derive(Debug)]
pub struct AtomicIdGenerator {
    next: AtomicU64,
}

impl AtomicIdGenerator {
    /// Create a generator whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for AtomicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for AtomicIdGenerator {
    fn next_id(&self) -> u64 {
        // Past the limit the sequence restarts at 1 rather than emit an id a
        // JSON double can't hold. One CAS claims both the id and its successor.
        let id = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| {
                Some(if id > MAX_SAFE_ID { 2 } else { id + 1 })
            })
            .unwrap_or_else(|id| id);
        if id > MAX_SAFE_ID {
            1
        } else {
            id
        }
    }
}

/// Random ids in `1..2^53`
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> u64 {
        rand::thread_rng().gen_range(1..=MAX_SAFE_ID)
    }
}

/// Always the same id
#[derive(Debug, Clone, Copy)]
pub struct FixedIdGenerator(pub u64);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_atomic_ids_are_sequential() {
        let ids = AtomicIdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_atomic_ids_unique_across_threads() {
        let ids = std::sync::Arc::new(AtomicIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = std::sync::Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_atomic_ids_wrap_below_safe_limit() {
        let ids = AtomicIdGenerator::starting_at(MAX_SAFE_ID);
        assert_eq!(ids.next_id(), MAX_SAFE_ID);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn test_wrap_is_unique_across_threads() {
        let ids = std::sync::Arc::new(AtomicIdGenerator::starting_at(MAX_SAFE_ID - 3));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = std::sync::Arc::clone(&ids);
                std::thread::spawn(move || (0..50).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!((1..=MAX_SAFE_ID).contains(&id));
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 400);
        assert!(seen.contains(&1));
    }

    #[test]
    fn test_random_ids_in_range() {
        for _ in 0..1000 {
            let id = RandomIdGenerator.next_id();
            assert!((1..=MAX_SAFE_ID).contains(&id));
        }
    }

    #[test]
    fn test_fixed_id() {
        assert_eq!(FixedIdGenerator(7).next_id(), 7);
    }
}
