use std::collections::BTreeMap;

use crate::rating::Rating;

/// A key and everything recorded under it. `None` means the producer sent
/// no collection at all for the key.
pub type Group<K, V> = (K, Option<Vec<V>>);

/// Groups raw ratings by product id, one group per product, sorted by key.
pub fn group_by_product(ratings: impl IntoIterator<Item = Rating>) -> Vec<Group<i32, Rating>> {
    let mut map: BTreeMap<i32, Vec<Rating>> = BTreeMap::new();
    for rating in ratings {
        map.entry(rating.product).or_default().push(rating);
    }
    map.into_iter().map(|(k, v)| (k, Some(v))).collect()
}

/// Folds groups that may repeat a key into one group per key.
///
/// A key seen only with absent groups stays absent; otherwise the present
/// groups are concatenated in input order.
pub fn merge_groups<K: Ord, V>(groups: impl IntoIterator<Item = Group<K, V>>) -> Vec<Group<K, V>> {
    let mut merged: BTreeMap<K, Option<Vec<V>>> = BTreeMap::new();
    for (key, values) in groups {
        let entry = merged.entry(key).or_insert(None);
        if let Some(values) = values {
            entry.get_or_insert_with(Vec::new).extend(values);
        }
    }
    merged.into_iter().collect()
}
