//! Bounded cache whose entries expire after a fixed time-to-live.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cache entry with its insertion time.
struct Entry<V> {
    inserted: Instant,
    value: V,
}

/// Time-to-live cache holding at most `capacity` entries.
pub struct TtlCache<K, V, C = SystemClock> {
    entries: HashMap<K, Entry<V>>,
    capacity: usize,
    ttl: Duration,
    clock: C,
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Creates an empty cache.
    pub fn new(capacity: usize, ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            ttl,
            clock,
        }
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted) < self.ttl
    }

    /// Returns the value for `key` if it has not expired. Expired entries are
    /// dropped.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        let fresh = self.entries.get(key).map(|e| self.is_fresh(e, now))?;
        if !fresh {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Stores a value, evicting expired entries and then the oldest entry if
    /// the cache is full.
    pub fn insert(&mut self, key: K, value: V) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.inserted) < ttl);

        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.inserted)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            key,
            Entry {
                inserted: now,
                value,
            },
        );
    }

    /// Number of stored entries, including ones that have expired but were
    /// not yet evicted.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the clock driving expiry.
    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Manually advanced clock for tests.
#[cfg(test)]
pub struct ManualClock {
    start: Instant,
    offset: std::cell::Cell<Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: std::cell::Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> TtlCache<&'static str, u32, ManualClock> {
        TtlCache::new(capacity, Duration::from_secs(60), ManualClock::new())
    }

    #[test]
    fn test_fresh_entry_is_returned() {
        let mut cache = cache(10);
        cache.insert("weather", 1);
        cache.clock().advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"weather"), Some(&1));
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let mut cache = cache(10);
        cache.insert("weather", 1);
        cache.clock().advance(Duration::from_secs(60));
        assert_eq!(cache.get(&"weather"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_reinsert_restarts_ttl() {
        let mut cache = cache(10);
        cache.insert("weather", 1);
        cache.clock().advance(Duration::from_secs(50));
        cache.insert("weather", 2);
        cache.clock().advance(Duration::from_secs(50));
        assert_eq!(cache.get(&"weather"), Some(&2));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = cache(2);
        cache.insert("a", 1);
        cache.clock().advance(Duration::from_secs(1));
        cache.insert("b", 2);
        cache.clock().advance(Duration::from_secs(1));
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_insert_purges_expired() {
        let mut cache = cache(10);
        cache.insert("a", 1);
        cache.clock().advance(Duration::from_secs(61));
        cache.insert("b", 2);
        assert_eq!(cache.len(), 1);
    }
}
