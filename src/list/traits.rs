//! Standard trait implementations for `HandleList`.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

use super::{Handle, HandleList};

impl<T> Default for HandleList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the backing store slot for slot and keeps the list identity, so
/// handles issued by the original resolve to the corresponding elements of the
/// clone.
impl<T: Clone> Clone for HandleList<T> {
    fn clone(&self) -> Self {
        Self {
            links: self.links.clone(),
            values: self.values.clone(),
            head: self.head,
            tail: self.tail,
            free_head: self.free_head,
            len: self.len,
            id: self.id,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HandleList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for HandleList<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for HandleList<T> {}

impl<T: PartialOrd> PartialOrd for HandleList<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for HandleList<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for HandleList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T> Extend<T> for HandleList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for HandleList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> FromIterator<T> for HandleList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for HandleList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T> From<Vec<T>> for HandleList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> Index<Handle> for HandleList<T> {
    type Output = T;

    /// # Panics
    /// Panics if `node` does not reference a live element.
    #[inline]
    fn index(&self, node: Handle) -> &T {
        match self.get(node) {
            Some(value) => value,
            None => panic!("invalid handle: {node}"),
        }
    }
}

impl<T> IndexMut<Handle> for HandleList<T> {
    /// # Panics
    /// Panics if `node` does not reference a live element.
    #[inline]
    fn index_mut(&mut self, node: Handle) -> &mut T {
        match self.get_mut(node) {
            Some(value) => value,
            None => panic!("invalid handle: {node}"),
        }
    }
}

/// Positional access. Walks from the nearer end, so this is O(n/2); prefer
/// handles for repeated access.
impl<T> Index<usize> for HandleList<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.handle(index) {
            Some(node) => &self[node],
            None => panic!("index out of bounds: the len is {} but the index is {index}", self.len),
        }
    }
}

impl<T> IndexMut<usize> for HandleList<T> {
    /// # Panics
    /// Panics if `index >= len`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.handle(index) {
            Some(node) => &mut self[node],
            None => panic!("index out of bounds: the len is {} but the index is {index}", self.len),
        }
    }
}
