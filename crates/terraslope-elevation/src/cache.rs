//! Process-wide elevation cache with TTL expiry and bounded size.

use crate::Coordinate;
use crate::coord::CoordKey;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default time-to-live for a cached elevation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default maximum number of cached entries.
///
/// Each entry is a key pair plus an f64 and a timestamp, so 50,000 entries
/// stay well under 5 MB.
pub const DEFAULT_CAPACITY: usize = 50_000;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    elevation: f64,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<CoordKey, CacheEntry>,
    /// Insertion order, oldest at the front. Eviction pops from the front.
    insertion_order: VecDeque<CoordKey>,
}

/// A bounded, time-expiring elevation cache keyed by quantized coordinates.
///
/// Entries older than the TTL are treated as absent and evicted on read.
/// When an insert would exceed the capacity, the single oldest-inserted entry
/// is removed. Eviction is strictly insertion-ordered (FIFO), not LRU: a hot
/// key inserted early is still the first to go. That can evict keys that are
/// still being read, which is an accepted approximation for this workload.
///
/// The cache is safe for concurrent use; batches running in parallel share
/// hits through it.
#[derive(Debug)]
pub struct ElevationCache {
    inner: Mutex<CacheInner>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ElevationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevationCache {
    /// Create a cache with the default TTL (1 hour) and capacity (50,000).
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    /// Create a cache with an explicit TTL and capacity.
    pub fn with_config(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Look up a cached elevation.
    ///
    /// Returns `None` if the coordinate was never cached or its entry has
    /// outlived the TTL; expired entries are evicted as a side effect.
    pub fn get(&self, coord: Coordinate) -> Option<f64> {
        self.get_at(coord, Instant::now())
    }

    /// Insert or overwrite an elevation, timestamped now.
    pub fn put(&self, coord: Coordinate, elevation: f64) {
        self.put_at(coord, elevation, Instant::now());
    }

    /// Number of physically present entries (expired ones included until a
    /// read evicts them).
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    /// True if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `get` with an explicit notion of "now", so tests can drive time
    /// without sleeping.
    pub(crate) fn get_at(&self, coord: Coordinate, now: Instant) -> Option<f64> {
        let key = coord.key();
        let mut inner = self.inner.lock().ok()?;

        let entry = *inner.entries.get(&key)?;
        if now.duration_since(entry.inserted_at) >= self.ttl {
            inner.entries.remove(&key);
            if let Some(pos) = inner.insertion_order.iter().position(|k| *k == key) {
                inner.insertion_order.remove(pos);
            }
            return None;
        }
        Some(entry.elevation)
    }

    /// `put` with an explicit timestamp.
    pub(crate) fn put_at(&self, coord: Coordinate, elevation: f64, now: Instant) {
        let key = coord.key();
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        // Overwrite resets the entry's place in the insertion order.
        if inner.entries.contains_key(&key) {
            if let Some(pos) = inner.insertion_order.iter().position(|k| *k == key) {
                inner.insertion_order.remove(pos);
            }
        } else if inner.entries.len() >= self.capacity {
            // Evict exactly one, the oldest-inserted entry.
            if let Some(oldest) = inner.insertion_order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }

        inner.entries.insert(
            key,
            CacheEntry {
                elevation,
                inserted_at: now,
            },
        );
        inner.insertion_order.push_back(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = ElevationCache::new();
        let coord = Coordinate::new(35.0, 139.0);
        cache.put(coord, 12.5);
        assert_eq!(cache.get(coord), Some(12.5));
    }

    #[test]
    fn test_miss_for_unknown_coord() {
        let cache = ElevationCache::new();
        assert_eq!(cache.get(Coordinate::new(35.0, 139.0)), None);
    }

    #[test]
    fn test_expired_entry_is_absent_and_evicted() {
        let cache = ElevationCache::with_config(Duration::from_secs(3600), 10);
        let coord = Coordinate::new(35.0, 139.0);
        let t0 = Instant::now();
        cache.put_at(coord, 12.5, t0);

        // Just inside the TTL
        assert_eq!(cache.get_at(coord, t0 + Duration::from_secs(3599)), Some(12.5));
        // At the TTL the entry is stale
        assert_eq!(cache.get_at(coord, t0 + Duration::from_secs(3600)), None);
        // And physically gone
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_capacity_evicts_single_oldest() {
        let cache = ElevationCache::with_config(Duration::from_secs(3600), 3);
        let coords: Vec<Coordinate> = (0..4)
            .map(|i| Coordinate::new(35.0 + i as f64, 139.0))
            .collect();

        for (i, coord) in coords.iter().enumerate().take(3) {
            cache.put(*coord, i as f64);
        }
        assert_eq!(cache.len(), 3);

        // Fourth insert evicts exactly the first-inserted entry.
        cache.put(coords[3], 3.0);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(coords[0]), None);
        assert_eq!(cache.get(coords[1]), Some(1.0));
        assert_eq!(cache.get(coords[2]), Some(2.0));
        assert_eq!(cache.get(coords[3]), Some(3.0));
    }

    #[test]
    fn test_eviction_is_insertion_order_not_lru() {
        let cache = ElevationCache::with_config(Duration::from_secs(3600), 2);
        let a = Coordinate::new(35.0, 139.0);
        let b = Coordinate::new(36.0, 139.0);
        let c = Coordinate::new(37.0, 139.0);

        cache.put(a, 1.0);
        cache.put(b, 2.0);
        // Read `a` repeatedly; FIFO eviction must still drop it first.
        for _ in 0..5 {
            assert_eq!(cache.get(a), Some(1.0));
        }
        cache.put(c, 3.0);
        assert_eq!(cache.get(a), None);
        assert_eq!(cache.get(b), Some(2.0));
        assert_eq!(cache.get(c), Some(3.0));
    }

    #[test]
    fn test_overwrite_refreshes_timestamp_and_order() {
        let cache = ElevationCache::with_config(Duration::from_secs(100), 2);
        let a = Coordinate::new(35.0, 139.0);
        let b = Coordinate::new(36.0, 139.0);
        let t0 = Instant::now();

        cache.put_at(a, 1.0, t0);
        cache.put_at(b, 2.0, t0 + Duration::from_secs(10));
        // Re-insert `a`; it is now the newest entry.
        cache.put_at(a, 1.5, t0 + Duration::from_secs(20));
        assert_eq!(cache.len(), 2);

        // Inserting a third entry evicts `b`, the oldest by insertion.
        cache.put_at(Coordinate::new(37.0, 139.0), 3.0, t0 + Duration::from_secs(30));
        assert_eq!(cache.get_at(b, t0 + Duration::from_secs(31)), None);
        assert_eq!(cache.get_at(a, t0 + Duration::from_secs(31)), Some(1.5));
    }

    #[test]
    fn test_formatted_float_noise_shares_entry() {
        let cache = ElevationCache::new();
        cache.put(Coordinate::new(35.123456781, 139.0), 7.0);
        assert_eq!(cache.get(Coordinate::new(35.123456779, 139.0)), Some(7.0));
    }
}
