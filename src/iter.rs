//! Iterators over a [`HandleList`].
//!
//! The borrowing iterators walk the chain from both ends at once and count the
//! elements still to be yielded, so front and back traversal meet without
//! yielding an element twice.

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::list::{Handle, HandleList, Slot};

/// Iterator over the handles of a [`HandleList`], in list order.
///
/// Created by [`HandleList::handles`].
pub struct Handles<'a, T> {
    list: &'a HandleList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Handles<'a, T> {
    pub(crate) fn new(list: &'a HandleList<T>) -> Self {
        Self {
            front: list.head,
            back: list.tail,
            remaining: list.len,
            list,
        }
    }
}

impl<T> Clone for Handles<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T> Iterator for Handles<'_, T> {
    type Item = Handle;

    #[inline]
    fn next(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.front = self.list.links[idx].next();
        self.remaining -= 1;
        Some(self.list.handle_of(idx))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Handles<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.back = self.list.links[idx].prev();
        self.remaining -= 1;
        Some(self.list.handle_of(idx))
    }
}

impl<T> ExactSizeIterator for Handles<'_, T> {}

impl<T> FusedIterator for Handles<'_, T> {}

/// Iterator over references to the elements of a [`HandleList`].
///
/// Created by [`HandleList::iter`].
pub struct Iter<'a, T> {
    list: &'a HandleList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a HandleList<T>) -> Self {
        Self {
            front: list.head,
            back: list.tail,
            remaining: list.len,
            list,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.front = self.list.links[idx].next();
        self.remaining -= 1;
        Some(self.list.value(idx))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    #[inline]
    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.back = self.list.links[idx].prev();
        self.remaining -= 1;
        Some(self.list.value(idx))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mutable references to the elements of a [`HandleList`].
///
/// Created by [`HandleList::iter_mut`]. Holds the list's exclusive borrow for
/// its whole lifetime.
pub struct IterMut<'a, T> {
    links: &'a [Slot],
    values: NonNull<Option<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: `IterMut` behaves like `&'a mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: as above.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut HandleList<T>) -> Self {
        let HandleList {
            links,
            values,
            head,
            tail,
            len,
            ..
        } = list;
        Self {
            values: NonNull::from(values.as_mut_slice()).cast(),
            links: links.as_slice(),
            front: *head,
            back: *tail,
            remaining: *len,
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// `idx` must be a live slot that this iterator has not yielded yet.
    #[inline]
    unsafe fn value_at(&mut self, idx: usize) -> &'a mut T {
        debug_assert!(idx < self.links.len());
        // SAFETY: `values` spans `links.len()` slots of an exclusively
        // borrowed list, and each live index is handed out at most once
        // because `remaining` stops the two walks where they meet.
        match unsafe { &mut *self.values.as_ptr().add(idx) } {
            Some(value) => value,
            None => unreachable!("corrupted list: live slot without a value"),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.front = self.links[idx].next();
        self.remaining -= 1;
        // SAFETY: `idx` came off the front of the unvisited chain.
        Some(unsafe { self.value_at(idx) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    #[inline]
    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.back = self.links[idx].prev();
        self.remaining -= 1;
        // SAFETY: `idx` came off the back of the unvisited chain.
        Some(unsafe { self.value_at(idx) })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over the elements of a [`HandleList`].
///
/// Created by [`HandleList::into_iter`]. Each step frees the element's slot.
pub struct IntoIter<T>(HandleList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for HandleList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a HandleList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut HandleList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
