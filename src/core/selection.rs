//! First-maximum selection.
//!
//! Every "most recent" query in the crate (highest process version, latest
//! milestone timestamp) goes through [`first_max_by_key`]. The scan only
//! replaces its current best on a strictly greater key, so among tied
//! maxima the earliest item in iteration order wins.

/// Return the first item whose key is maximal.
///
/// `Iterator::max_by_key` returns the *last* maximal element, which is
/// the opposite tie-break; this scan is the one to use for ordered records.
///
/// # Example
///
/// ```rust
/// use milestone::core::first_max_by_key;
///
/// let records = [("a", 2), ("b", 5), ("c", 5), ("d", 1)];
/// let best = first_max_by_key(records.iter(), |(_, v)| *v);
/// assert_eq!(best, Some(&("b", 5)));
///
/// let none = first_max_by_key(std::iter::empty::<u32>(), |v| *v);
/// assert_eq!(none, None);
/// ```
pub fn first_max_by_key<I, T, K, F>(items: I, key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let candidate = key(&item);
        let replace = match &best {
            Some((_, current)) => candidate > *current,
            None => true,
        };
        if replace {
            best = Some((item, candidate));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_selects_nothing() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(first_max_by_key(items, |v| *v), None);
    }

    #[test]
    fn single_item_is_selected() {
        assert_eq!(first_max_by_key(vec![4], |v| *v), Some(4));
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let items = vec![(0, 3), (1, 9), (2, 9), (3, 9)];
        let best = first_max_by_key(items, |(_, k)| *k);
        assert_eq!(best, Some((1, 9)));
    }

    #[test]
    fn later_strictly_greater_replaces() {
        let items = vec![(0, 1), (1, 1), (2, 2)];
        let best = first_max_by_key(items, |(_, k)| *k);
        assert_eq!(best, Some((2, 2)));
    }

    #[test]
    fn differs_from_std_max_by_key_on_ties() {
        let items = [(0, 5), (1, 5)];
        let std_pick = items.iter().max_by_key(|(_, k)| *k);
        let ours = first_max_by_key(items.iter(), |(_, k)| *k);
        assert_eq!(std_pick, Some(&(1, 5)));
        assert_eq!(ours, Some(&(0, 5)));
    }
}
