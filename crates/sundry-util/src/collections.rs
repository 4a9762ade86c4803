//! Order-preserving collection helpers.
//!
//! These work on any `PartialEq` item, so they also cover values that
//! cannot be hashed or ordered (floats, dynamic documents). Lookups are
//! linear; the inputs are expected to be small.

/// Remove duplicates, keeping the first occurrence of each item.
///
/// ```
/// use sundry_util::collections::dedup_stable;
///
/// assert_eq!(dedup_stable(vec![1, 2, 1, 3, 2]), vec![1, 2, 3]);
/// ```
pub fn dedup_stable<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        push_unique(&mut out, item);
    }
    out
}

/// Push `item` unless an equal item is already present.
///
/// Returns `true` if the item was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}
