//! Time-bounded single-value cache used by the monitor.

/// A value remembered together with the time it was fetched.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    value: Option<T>,
    fetched_at_ms: i64,
    ttl_ms: i64,
}

impl<T> Cached<T> {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            value: None,
            fetched_at_ms: 0,
            ttl_ms,
        }
    }

    /// The cached value while it is younger than the TTL.
    pub fn get(&self, now_ms: i64) -> Option<&T> {
        self.value.as_ref().filter(|_| now_ms - self.fetched_at_ms < self.ttl_ms)
    }

    /// Mutable access for write-through updates; does not refresh the age.
    pub fn get_mut(&mut self, now_ms: i64) -> Option<&mut T> {
        if now_ms - self.fetched_at_ms < self.ttl_ms {
            self.value.as_mut()
        } else {
            None
        }
    }

    pub fn put(&mut self, value: T, now_ms: i64) {
        self.value = Some(value);
        self.fetched_at_ms = now_ms;
    }

    pub fn invalidate(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let mut cache = Cached::new(4_000);
        assert!(cache.get(0).is_none());
        cache.put("org.example.feed", 1_000);
        assert_eq!(cache.get(4_999), Some(&"org.example.feed"));
        assert!(cache.get(5_000).is_none());
    }

    #[test]
    fn invalidate_drops_value() {
        let mut cache = Cached::new(30_000);
        cache.put(vec![1, 2], 0);
        cache.invalidate();
        assert!(cache.get(1).is_none());
    }
}
