//! In-place ordering primitives used by the ranking step.
//!
//! The two sorts differ on ties and both behaviours show up in the report:
//! SMS, MMS and email use [`selection_sort_by`] (equal keys may reorder),
//! incidents use [`insertion_sort_by`] (equal keys keep input order).

/// Selection sort. `less(a, b)` must return true iff `a` orders before `b`.
pub fn selection_sort_by<T, F>(items: &mut [T], less: F)
where
    F: Fn(&T, &T) -> bool,
{
    for i in 0..items.len() {
        let mut min_idx = i;
        for j in i..items.len() {
            if less(&items[j], &items[min_idx]) {
                min_idx = j;
            }
        }
        items.swap(i, min_idx);
    }
}

/// Insertion sort. Stable.
pub fn insertion_sort_by<T, F>(items: &mut [T], less: F)
where
    F: Fn(&T, &T) -> bool,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && less(&items[j], &items[j - 1]) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_copy(items: &[(u32, char)]) -> Vec<(u32, char)> {
        let mut copy = items.to_vec();
        copy.sort();
        copy
    }

    #[test]
    fn test_selection_sort_orders_by_key() {
        let mut items = vec![(5, 'a'), (1, 'b'), (4, 'c'), (1, 'd'), (3, 'e')];
        let original = items.clone();

        selection_sort_by(&mut items, |a, b| a.0 < b.0);

        let keys: Vec<u32> = items.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec![1, 1, 3, 4, 5]);
        assert_eq!(sorted_copy(&items), sorted_copy(&original));
    }

    #[test]
    fn test_selection_sort_may_reorder_ties() {
        let mut items = vec![(2, 'a'), (2, 'b'), (1, 'c')];
        selection_sort_by(&mut items, |a, b| a.0 < b.0);
        assert_eq!(items, vec![(1, 'c'), (2, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_insertion_sort_is_stable() {
        let mut items = vec![(2, 'a'), (2, 'b'), (1, 'c'), (2, 'd'), (1, 'e')];
        insertion_sort_by(&mut items, |a, b| a.0 < b.0);
        assert_eq!(items, vec![(1, 'c'), (1, 'e'), (2, 'a'), (2, 'b'), (2, 'd')]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<u32> = vec![];
        selection_sort_by(&mut empty, |a, b| a < b);
        insertion_sort_by(&mut empty, |a, b| a < b);
        assert!(empty.is_empty());

        let mut one = vec![7];
        selection_sort_by(&mut one, |a, b| a < b);
        insertion_sort_by(&mut one, |a, b| a < b);
        assert_eq!(one, vec![7]);
    }
}
