//! In-place sorting by relinking.
//!
//! Values never move: the live slots are ordered in an auxiliary index vector
//! and the chain is rewritten to follow it. Every handle keeps referencing the
//! same value; only its position in list order changes.

use core::cmp::Ordering;

use super::HandleList;
use crate::macros::trace_event;

impl<T> HandleList<T> {
    /// Sorts the list in ascending order, keeping equal elements in their
    /// original relative order. O(n log n) with an auxiliary buffer of n
    /// indices.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h3 = list.push_back(3);
    /// let h1 = list.push_back(1);
    /// list.extend([2, 5, 4]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(list[h3], 3);
    /// assert_eq!(list.front_node(), Some(h1));
    /// ```
    #[inline]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.relink_sorted(T::cmp, true);
    }

    /// Stable sort with a comparator. See [`sort`](Self::sort).
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3, 4, 5]);
    /// list.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(list.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    #[inline]
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.relink_sorted(compare, true);
    }

    /// Stable sort by an extracted key. See [`sort`](Self::sort).
    #[inline]
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.relink_sorted(|a, b| key(a).cmp(&key(b)), true);
    }

    /// Sorts the list in ascending order without preserving the relative order
    /// of equal elements. Handles keep referencing the same values.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([5, 4, 3, 2, 1, 0]);
    /// let five = list.front_node().unwrap();
    ///
    /// list.sort_unstable();
    ///
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    /// assert_eq!(list.back_node(), Some(five));
    /// ```
    #[inline]
    pub fn sort_unstable(&mut self)
    where
        T: Ord,
    {
        self.relink_sorted(T::cmp, false);
    }

    /// Unstable sort with a comparator. See
    /// [`sort_unstable`](Self::sort_unstable).
    #[inline]
    pub fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.relink_sorted(compare, false);
    }

    /// Unstable sort by an extracted key. See
    /// [`sort_unstable`](Self::sort_unstable).
    #[inline]
    pub fn sort_unstable_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.relink_sorted(|a, b| key(a).cmp(&key(b)), false);
    }

    fn relink_sorted<F>(&mut self, mut compare: F, stable: bool)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        trace_event!(len = self.len, stable, "relinking sorted list");

        let mut order: Vec<usize> = self.handles().map(|h| h.index).collect();
        {
            let this = &*self;
            let by_value = |a: &usize, b: &usize| compare(this.value(*a), this.value(*b));
            if stable {
                order.sort_by(by_value);
            } else {
                order.sort_unstable_by(by_value);
            }
        }

        for pair in order.windows(2) {
            self.links[pair[0]].set_next(Some(pair[1]));
            self.links[pair[1]].set_prev(Some(pair[0]));
        }
        let (first, last) = (order[0], order[order.len() - 1]);
        self.links[first].set_prev(None);
        self.links[last].set_next(None);
        self.head = Some(first);
        self.tail = Some(last);
    }
}

#[cfg(test)]
mod tests {
    use crate::HandleList;

    #[test]
    fn stable_sort_keeps_equal_keys_in_order() {
        let mut list = HandleList::from([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        list.sort_by_key(|&(k, _)| k);
        assert_eq!(list.to_vec(), vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn sort_keeps_handles_bound_to_values() {
        let mut list = HandleList::new();
        let handles: Vec<_> = [9, 3, 7, 1].into_iter().map(|v| list.push_back(v)).collect();

        list.sort_unstable();

        for (h, v) in handles.iter().zip([9, 3, 7, 1]) {
            assert_eq!(list.get(*h), Some(&v));
        }
        assert_eq!(list.to_vec(), vec![1, 3, 7, 9]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![9, 7, 3, 1]);
    }

    #[test]
    fn sort_around_freed_slots() {
        let mut list = HandleList::from([4, 8, 2, 6]);
        let eight = list.handle(1).unwrap();
        list.remove_node(eight);
        list.push_front(5);

        list.sort_unstable_by(|a, b| b.cmp(a));

        assert_eq!(list.to_vec(), vec![6, 5, 4, 2]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn sorting_short_lists_is_a_no_op() {
        let mut empty: HandleList<i32> = HandleList::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = HandleList::from([1]);
        single.sort_unstable();
        assert_eq!(single.to_vec(), vec![1]);
    }
}
