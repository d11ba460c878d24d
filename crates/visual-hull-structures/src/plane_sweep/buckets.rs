//! Tolerance-bucketed map keyed by sweep coordinate.

use std::collections::BTreeMap;

/// Map from a floating sweep key to a value, merging keys closer than `precision`.
///
/// Keys are quantized to `round(key / precision)`. A lookup inspects the
/// quantized slot and its two neighbours, so two keys differing by less
/// than `precision` always resolve to the same entry, whichever was stored
/// first. Each entry remembers the key it was created with.
#[derive(Debug, Clone)]
pub struct SweepBuckets<T> {
    precision: f64,
    slots: BTreeMap<i64, (f64, T)>,
}

impl<T> SweepBuckets<T> {
    /// Creates an empty map. `precision` must be positive.
    pub fn new(precision: f64) -> Self {
        Self {
            precision,
            slots: BTreeMap::new(),
        }
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn quantize(&self, key: f64) -> i64 {
        (key / self.precision).round() as i64
    }

    /// Slot whose representative key is within `precision` of `key`.
    fn slot_of(&self, key: f64) -> Option<i64> {
        let q = self.quantize(key);
        [q, q - 1, q + 1]
            .into_iter()
            .filter_map(|slot| {
                self.slots
                    .get(&slot)
                    .map(|(rep, _)| (slot, (rep - key).abs()))
            })
            .filter(|&(_, distance)| distance < self.precision)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(slot, _)| slot)
    }

    /// Representative key and value of the bucket containing `key`.
    pub fn get(&self, key: f64) -> Option<(f64, &T)> {
        let slot = self.slot_of(key)?;
        self.slots.get(&slot).map(|(rep, value)| (*rep, value))
    }

    pub fn get_mut(&mut self, key: f64) -> Option<&mut T> {
        let slot = self.slot_of(key)?;
        self.slots.get_mut(&slot).map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: f64) -> bool {
        self.slot_of(key).is_some()
    }

    /// Value of the bucket containing `key`, created with `default` if absent.
    pub fn get_or_insert_with(&mut self, key: f64, default: impl FnOnce() -> T) -> &mut T {
        let slot = self.slot_of(key).unwrap_or_else(|| self.quantize(key));
        &mut self.slots.entry(slot).or_insert_with(|| (key, default())).1
    }

    /// Representative keys in increasing order.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots.values().map(|(rep, _)| *rep)
    }

    /// `(key, value)` pairs in increasing key order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.slots.values().map(|(rep, value)| (*rep, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.values().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.values_mut().map(|(_, value)| value)
    }

    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.slots.into_values().map(|(_, value)| value)
    }

    /// Transforms every value, keeping keys and bucket layout.
    pub fn map<U>(self, mut f: impl FnMut(f64, T) -> U) -> SweepBuckets<U> {
        SweepBuckets {
            precision: self.precision,
            slots: self
                .slots
                .into_iter()
                .map(|(slot, (rep, value))| (slot, (rep, f(rep, value))))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_merges_close_keys() {
        let mut buckets = SweepBuckets::new(1e-6);
        buckets.get_or_insert_with(0.5, Vec::new).push(1);
        buckets.get_or_insert_with(0.5 + 4e-7, Vec::new).push(2);
        buckets.get_or_insert_with(1.5, Vec::new).push(3);

        assert_eq!(buckets.len(), 2);
        let (key, values) = buckets.get(0.5 - 3e-7).unwrap();
        assert_eq!(key, 0.5);
        assert_eq!(values, &vec![1, 2]);
        assert!(!buckets.contains_key(1.0));
        assert_eq!(buckets.keys().collect::<Vec<_>>(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_straddling_rounding_boundary() {
        // 0.49 and 0.51 quantize to different slots but are still within precision.
        let mut buckets = SweepBuckets::new(1.0);
        *buckets.get_or_insert_with(0.49, || 0) += 1;
        *buckets.get_or_insert_with(0.51, || 0) += 1;
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.get(0.51).map(|(_, v)| *v), Some(2));
    }

    #[test]
    fn test_map_preserves_order() {
        let mut buckets = SweepBuckets::new(0.1);
        for key in [3.0, -1.0, 2.0] {
            buckets.get_or_insert_with(key, || key);
        }
        let doubled = buckets.map(|key, value| key + value);
        assert_eq!(doubled.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![-2.0, 4.0, 6.0]);
        assert_eq!(doubled.precision(), 0.1);
    }

    #[test]
    fn test_close_keys_share_bucket() {
        proptest!(|(key in -1.0e3..1.0e3f64, offset in -0.999..0.999f64)| {
            let precision = 1e-3;
            let mut buckets = SweepBuckets::new(precision);
            buckets.get_or_insert_with(key, || 0u32);
            *buckets.get_or_insert_with(key + offset * precision, || 0u32) += 1;
            prop_assert_eq!(buckets.len(), 1);
        });
    }

    #[test]
    fn test_keys_a_step_apart_stay_apart() {
        proptest!(|(key in -1.0e3..1.0e3f64, step in 0.01..10.0f64, extra in 0.0..1.0f64)| {
            let mut buckets = SweepBuckets::new(1e-6);
            buckets.get_or_insert_with(key, || ());
            buckets.get_or_insert_with(key + step * (1.0 + extra), || ());
            prop_assert_eq!(buckets.len(), 2);
        });
    }
}
