use std::rc::{Rc, Weak};

/// Values keyed by `Rc` identity. An entry lives until its key is dropped
/// and the next [`RcCache::prune`].
pub(super) struct RcCache<K, V> {
    entries: Vec<(Weak<K>, V)>,
}

impl<K, V> Default for RcCache<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K, V> RcCache<K, V> {
    /// Drops entries whose key is gone.
    pub(super) fn prune(&mut self) {
        self.entries.retain(|(key, _)| key.strong_count() > 0);
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(super) fn get(&self, key: &Rc<K>) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| Weak::as_ptr(k) == Rc::as_ptr(key))
            .map(|(_, v)| v)
    }

    /// Builds the value for `key` unless it is already cached.
    pub(super) fn ensure_with(&mut self, key: &Rc<K>, make: impl FnOnce() -> V) {
        if self.get(key).is_none() {
            self.entries.push((Rc::downgrade(key), make()));
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_built_once_per_key() {
        let mut cache = RcCache::default();
        let key = Rc::new(7u32);
        let mut builds = 0;
        for _ in 0..3 {
            cache.ensure_with(&key, || {
                builds += 1;
                "bound"
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(cache.get(&key), Some(&"bound"));
        assert_eq!(cache.get(&Rc::clone(&key)), Some(&"bound"));
    }

    #[test]
    fn equal_values_in_distinct_rcs_are_distinct_keys() {
        let mut cache = RcCache::default();
        let a = Rc::new(1u32);
        let b = Rc::new(1u32);
        cache.ensure_with(&a, || 'a');
        cache.ensure_with(&b, || 'b');
        assert_eq!(cache.get(&a), Some(&'a'));
        assert_eq!(cache.get(&b), Some(&'b'));
    }

    #[test]
    fn dropped_keys_are_pruned() {
        let mut cache = RcCache::default();
        let kept = Rc::new(1u32);
        let gone = Rc::new(2u32);
        cache.ensure_with(&kept, || 1);
        cache.ensure_with(&gone, || 2);
        drop(gone);

        cache.prune();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&kept), Some(&1));

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
