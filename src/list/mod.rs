//! `HandleList`: a doubly linked list stored in a vector arena.
//!
//! Elements live in a contiguous backing store and are linked through
//! `prev`/`next` indices kept beside them, so list order is independent of
//! slot position. Freed slots are chained into a free list and recycled by
//! later insertions.
//!
//! # Layout
//! Structure-of-arrays:
//! - `links`: per-slot generation and link state. Traversal and relinking only
//!   touch this vector.
//! - `values`: per-slot element storage, `None` for free slots.
//!
//! # Handles
//! Every insertion returns a [`Handle`] (list identity + slot index +
//! generation). Handles stay valid until their own element is removed;
//! afterwards they never resolve again, even once the slot is reused, because
//! every removal bumps the slot's generation. Each list draws its identity from
//! a process-wide counter, so a handle never resolves against a list that did
//! not issue it.

mod handle;
mod slot;
mod sort;
mod traits;

#[cfg(test)]
mod tests;

pub use handle::Handle;

use handle::next_list_id;

pub(crate) use slot::{Link, Slot};

use std::collections::TryReserveError;

use crate::cursor::{Cursor, CursorMut};
use crate::error::StaleHandle;
use crate::iter::{Handles, Iter, IterMut};
use crate::macros::trace_event;

/// A doubly linked list whose elements are addressed by stable [`Handle`]s.
///
/// All link mutations (push, pop, insert next to a handle, remove by handle)
/// run in O(1). The backing store grows by amortized doubling only when no
/// freed slot is available, and growth never invalidates handles.
///
/// ```
/// use handle_list::HandleList;
///
/// let mut list = HandleList::new();
/// let ten = list.push_back(10);
/// list.push_back(20);
/// list.push_front(5);
/// assert_eq!(list.to_vec(), vec![5, 10, 20]);
///
/// assert_eq!(list.remove_node(ten), Some(10));
/// assert_eq!(list.get(ten), None);
/// assert_eq!(list.to_vec(), vec![5, 20]);
/// ```
pub struct HandleList<T> {
    pub(crate) links: Vec<Slot>,
    pub(crate) values: Vec<Option<T>>,
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    free_head: Option<usize>,
    pub(crate) len: usize,
    id: u32,
}

impl<T> HandleList<T> {
    /// Creates an empty list. Does not allocate.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            links: Vec::new(),
            values: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
            id: next_list_id(),
        }
    }

    /// Creates an empty list with room for `capacity` elements before the
    /// backing store has to grow.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let list: HandleList<u8> = HandleList::with_capacity(16);
    /// assert!(list.capacity() >= 16);
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
            id: next_list_id(),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the backing store can hold without
    /// reallocating. Freed slots count towards it.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.links.capacity().min(self.values.capacity())
    }

    /// Reserves room for at least `additional` more slots.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.links.reserve(additional);
        self.values.reserve(additional);
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// # Errors
    /// Returns the allocator's error if the capacity overflows or the
    /// allocation fails. The list is left unchanged in that case apart from
    /// capacity already obtained.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.links.try_reserve(additional)?;
        self.values.try_reserve(additional)
    }

    /// Releases unused backing capacity.
    ///
    /// Freed slots are kept: dropping them would let a recycled slot start its
    /// generation count over and revive stale handles.
    pub fn shrink_to_fit(&mut self) {
        self.links.shrink_to_fit();
        self.values.shrink_to_fit();
    }

    /// Returns a reference to the first element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|idx| self.value(idx))
    }

    /// Returns a mutable reference to the first element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|idx| self.value_mut(idx))
    }

    /// Returns a reference to the last element, or `None` if the list is empty.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let list = HandleList::from([1, 2, 3]);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|idx| self.value(idx))
    }

    /// Returns a mutable reference to the last element, or `None` if the list
    /// is empty.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// if let Some(v) = list.back_mut() {
    ///     *v = 42;
    /// }
    /// assert_eq!(list.to_vec(), vec![1, 2, 42]);
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|idx| self.value_mut(idx))
    }

    /// Returns the handle of the first element, or `None` if the list is empty.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// let h = list.push_front(42);
    /// assert_eq!(list.front_node(), Some(h));
    /// ```
    #[inline]
    pub fn front_node(&self) -> Option<Handle> {
        self.head.map(|idx| self.handle_of(idx))
    }

    /// Returns the handle of the last element, or `None` if the list is empty.
    #[inline]
    pub fn back_node(&self) -> Option<Handle> {
        self.tail.map(|idx| self.handle_of(idx))
    }

    /// Returns a reference to the element behind `node`, or `None` if the
    /// handle no longer references a live element.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h = list.push_back(42);
    /// assert_eq!(list.get(h), Some(&42));
    ///
    /// list.remove_node(h);
    /// assert_eq!(list.get(h), None);
    /// ```
    #[inline]
    pub fn get(&self, node: Handle) -> Option<&T> {
        self.resolve(node).map(|idx| self.value(idx))
    }

    /// Returns a mutable reference to the element behind `node`, or `None` if
    /// the handle no longer references a live element.
    #[inline]
    pub fn get_mut(&mut self, node: Handle) -> Option<&mut T> {
        self.resolve(node).map(|idx| self.value_mut(idx))
    }

    /// Returns `true` if `node` references a live element of this list.
    #[inline]
    pub fn contains_node(&self, node: Handle) -> bool {
        self.resolve(node).is_some()
    }

    /// Returns the handle following `node` in list order. `None` if `node` is
    /// the last element or is stale.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(1);
    /// let h2 = list.push_back(2);
    /// assert_eq!(list.next_node(h1), Some(h2));
    /// assert_eq!(list.next_node(h2), None);
    /// ```
    #[inline]
    pub fn next_node(&self, node: Handle) -> Option<Handle> {
        let idx = self.resolve(node)?;
        self.links[idx].next().map(|next| self.handle_of(next))
    }

    /// Returns the handle preceding `node` in list order. `None` if `node` is
    /// the first element or is stale.
    #[inline]
    pub fn prev_node(&self, node: Handle) -> Option<Handle> {
        let idx = self.resolve(node)?;
        self.links[idx].prev().map(|prev| self.handle_of(prev))
    }

    /// Returns the value following `node`, if any.
    #[inline]
    pub fn next_value(&self, node: Handle) -> Option<&T> {
        let idx = self.resolve(node)?;
        self.links[idx].next().map(|next| self.value(next))
    }

    /// Returns the value preceding `node`, if any.
    #[inline]
    pub fn prev_value(&self, node: Handle) -> Option<&T> {
        let idx = self.resolve(node)?;
        self.links[idx].prev().map(|prev| self.value(prev))
    }

    /// Returns a mutable reference to the value following `node`, if any.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(1);
    /// list.push_back(2);
    /// if let Some(next) = list.next_value_mut(h1) {
    ///     *next = 20;
    /// }
    /// assert_eq!(list.to_vec(), vec![1, 20]);
    /// ```
    #[inline]
    pub fn next_value_mut(&mut self, node: Handle) -> Option<&mut T> {
        let idx = self.resolve(node)?;
        let next = self.links[idx].next()?;
        Some(self.value_mut(next))
    }

    /// Returns a mutable reference to the value preceding `node`, if any.
    #[inline]
    pub fn prev_value_mut(&mut self, node: Handle) -> Option<&mut T> {
        let idx = self.resolve(node)?;
        let prev = self.links[idx].prev()?;
        Some(self.value_mut(prev))
    }

    /// Returns the handle of the element at list position `index`. Walks from
    /// whichever end is nearer, so this is O(n/2).
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_front(1);
    /// let h2 = list.push_front(2);
    /// list.push_front(3);
    ///
    /// assert_eq!(list.handle(1), Some(h2));
    /// assert_eq!(list.handle(2), Some(h1));
    /// assert_eq!(list.handle(3), None);
    /// ```
    pub fn handle(&self, index: usize) -> Option<Handle> {
        if index >= self.len {
            None
        } else if index <= self.len / 2 {
            self.handles().nth(index)
        } else {
            self.handles().rev().nth(self.len - index - 1)
        }
    }

    /// Appends an element and returns its handle. O(1) amortized.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(1);
    /// let h2 = list.push_back(2);
    /// assert_eq!(list.next_node(h1), Some(h2));
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) -> Handle {
        self.insert_between(self.tail, None, value)
    }

    /// Prepends an element and returns its handle. O(1) amortized.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Handle {
        self.insert_between(None, self.head, value)
    }

    /// Inserts `value` right after the element behind `node` and returns the
    /// new element's handle. O(1) amortized.
    ///
    /// # Errors
    /// Returns [`StaleHandle`] carrying `value` back if `node` does not
    /// reference a live element.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(42);
    /// let h2 = list.insert_after(h1, 43).unwrap();
    /// assert_eq!(list.next_node(h1), Some(h2));
    /// assert_eq!(list[h2], 43);
    /// ```
    pub fn insert_after(&mut self, node: Handle, value: T) -> Result<Handle, StaleHandle<T>> {
        match self.resolve(node) {
            Some(idx) => Ok(self.insert_after_index(idx, value)),
            None => Err(StaleHandle::new(node, value)),
        }
    }

    /// Inserts `value` right before the element behind `node` and returns the
    /// new element's handle. O(1) amortized.
    ///
    /// # Errors
    /// Returns [`StaleHandle`] carrying `value` back if `node` does not
    /// reference a live element.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(42);
    /// let h2 = list.insert_before(h1, 43).unwrap();
    /// assert_eq!(list.next_node(h2), Some(h1));
    /// assert_eq!(list.front(), Some(&43));
    /// ```
    pub fn insert_before(&mut self, node: Handle, value: T) -> Result<Handle, StaleHandle<T>> {
        match self.resolve(node) {
            Some(idx) => Ok(self.insert_before_index(idx, value)),
            None => Err(StaleHandle::new(node, value)),
        }
    }

    /// Removes and returns the last element, or `None` if the list is empty.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let idx = self.tail?;
        Some(self.take(idx))
    }

    /// Removes and returns the first element, or `None` if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let idx = self.head?;
        Some(self.take(idx))
    }

    /// Removes the element behind `node` and returns it. Returns `None` if the
    /// handle is stale. O(1).
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// let middle = list.handle(1).unwrap();
    ///
    /// assert_eq!(list.remove_node(middle), Some(2));
    /// assert_eq!(list.remove_node(middle), None);
    /// assert_eq!(list, HandleList::from([1, 3]));
    /// ```
    #[inline]
    pub fn remove_node(&mut self, node: Handle) -> Option<T> {
        let idx = self.resolve(node)?;
        Some(self.take(idx))
    }

    /// Removes the first element equal to `value`. Returns whether an element
    /// was removed. O(n).
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3, 2]);
    /// assert!(list.remove(&2));
    /// assert!(!list.remove(&7));
    /// assert_eq!(list.to_vec(), vec![1, 3, 2]);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find_node(value) {
            Some(node) => self.remove_node(node).is_some(),
            None => false,
        }
    }

    /// Removes every element. Backing capacity is kept and every previously
    /// issued handle stays invalid.
    pub fn clear(&mut self) {
        trace_event!(freed = self.len, slots = self.links.len(), "clearing list");

        // Rebuild the free list over every slot, lowest index first.
        let mut next_free = None;
        for idx in (0..self.links.len()).rev() {
            let slot = &mut self.links[idx];
            if slot.is_live() {
                slot.vacate(next_free);
            } else {
                slot.link = Link::Free(next_free);
            }
            next_free = Some(idx);
        }
        self.free_head = next_free;
        self.head = None;
        self.tail = None;
        self.len = 0;

        for value in &mut self.values {
            drop(value.take());
        }
    }

    /// Moves every element of `other` to the back of `self`, in order, leaving
    /// `other` empty. O(len(other)).
    ///
    /// Handles into `self` stay valid. Handles issued by `other` do not carry
    /// over: the moved elements get new handles from `self`, and the old ones
    /// resolve against neither list.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut a = HandleList::from([1, 2]);
    /// let mut b = HandleList::from([3, 4]);
    /// let one = a.front_node().unwrap();
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    /// assert!(b.is_empty());
    /// assert_eq!(a.get(one), Some(&1));
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        trace_event!(moved = other.len, "appending list");
        self.reserve(other.len);
        while let Some(value) = other.pop_front() {
            self.push_back(value);
        }
    }

    /// Consumes the list and rebuilds it with its elements stored
    /// contiguously, in list order, at the front of the backing store.
    ///
    /// The rebuilt list has a new identity, so handles issued by the old list
    /// are rejected by it.
    #[must_use]
    pub fn compact(self) -> Self {
        trace_event!(len = self.len, slots = self.links.len(), "compacting list");
        let mut compacted = Self::with_capacity(self.len);
        compacted.extend(self);
        compacted
    }

    /// Returns `true` if some element equals `value`. O(n).
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Returns the handle of the first element equal to `value`. O(n).
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// list.push_back("a");
    /// let b = list.push_back("b");
    /// assert_eq!(list.find_node(&"b"), Some(b));
    /// assert_eq!(list.find_node(&"z"), None);
    /// ```
    pub fn find_node(&self, value: &T) -> Option<Handle>
    where
        T: PartialEq,
    {
        self.handles()
            .zip(self.iter())
            .find_map(|(node, v)| (v == value).then_some(node))
    }

    /// Returns a `Vec` with clones of the elements, in list order.
    #[inline]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over mutable references to the elements, front to
    /// back.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// list.iter_mut().for_each(|x| *x += 1);
    /// assert_eq!(list, HandleList::from([2, 3, 4]));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns an iterator over the handles of the elements, in list order.
    ///
    /// ```
    /// use handle_list::HandleList;
    ///
    /// let mut list = HandleList::new();
    /// let h1 = list.push_back(42);
    /// let h2 = list.push_back(43);
    /// assert_eq!(list.handles().collect::<Vec<_>>(), vec![h1, h2]);
    /// ```
    #[inline]
    pub fn handles(&self) -> Handles<'_, T> {
        Handles::new(self)
    }

    /// Returns a read-only cursor positioned at the first element, or at the
    /// ghost position if the list is empty.
    ///
    /// ```
    /// use handle_list::{CursorBase, HandleList};
    ///
    /// let list = HandleList::from([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&2));
    /// ```
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node())
    }

    /// Returns a read-write cursor positioned at the first element, or at the
    /// ghost position if the list is empty.
    ///
    /// ```
    /// use handle_list::{CursorBase, HandleList};
    ///
    /// let mut list = HandleList::from([1, 2, 3, 4, 5, 6]);
    /// let mut cursor = list.cursor_mut();
    /// cursor.forward(3);
    /// if let Some(v) = cursor.get_mut() {
    ///     *v = 42;
    /// }
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 42, 5, 6]);
    /// ```
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front)
    }

    /// Returns a read-only cursor positioned at `node`, or `None` if the handle
    /// is stale.
    #[inline]
    pub fn cursor_at(&self, node: Handle) -> Option<Cursor<'_, T>> {
        self.resolve(node)?;
        Some(Cursor::new(self, Some(node)))
    }

    /// Returns a read-write cursor positioned at `node`, or `None` if the
    /// handle is stale.
    #[inline]
    pub fn cursor_at_mut(&mut self, node: Handle) -> Option<CursorMut<'_, T>> {
        self.resolve(node)?;
        Some(CursorMut::new(self, Some(node)))
    }

    /// Maps a handle to its slot index if it references a live element of
    /// this list.
    #[inline]
    pub(crate) fn resolve(&self, node: Handle) -> Option<usize> {
        if node.list != self.id {
            return None;
        }
        match self.links.get(node.index) {
            Some(slot) if slot.generation == node.generation && slot.is_live() => {
                Some(node.index)
            }
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn handle_of(&self, idx: usize) -> Handle {
        Handle::new(self.id, idx, self.links[idx].generation)
    }

    #[inline]
    pub(crate) fn value(&self, idx: usize) -> &T {
        match &self.values[idx] {
            Some(value) => value,
            None => unreachable!("corrupted list: live slot without a value"),
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, idx: usize) -> &mut T {
        match &mut self.values[idx] {
            Some(value) => value,
            None => unreachable!("corrupted list: live slot without a value"),
        }
    }

    #[inline]
    pub(crate) fn insert_after_index(&mut self, idx: usize, value: T) -> Handle {
        let next = self.links[idx].next();
        self.insert_between(Some(idx), next, value)
    }

    #[inline]
    pub(crate) fn insert_before_index(&mut self, idx: usize, value: T) -> Handle {
        let prev = self.links[idx].prev();
        self.insert_between(prev, Some(idx), value)
    }

    /// Unlinks the live slot `idx`, frees it and returns its value.
    #[inline]
    pub(crate) fn take(&mut self, idx: usize) -> T {
        self.unlink(idx);
        self.release(idx)
    }

    fn insert_between(&mut self, prev: Option<usize>, next: Option<usize>, value: T) -> Handle {
        let idx = self.alloc(value);
        self.link(idx, prev, next);
        self.handle_of(idx)
    }

    /// Stores `value` in a recycled slot if one is free, otherwise in a new
    /// slot at the end of the backing store.
    fn alloc(&mut self, value: T) -> usize {
        if let Some(idx) = self.free_head {
            self.free_head = self.links[idx].occupy();
            self.values[idx] = Some(value);
            idx
        } else {
            let idx = self.links.len();
            if idx == self.capacity() {
                trace_event!(slots = idx, "backing store full, growing");
            }
            self.links.push(Slot::occupied());
            self.values.push(Some(value));
            idx
        }
    }

    /// Frees an already unlinked slot and moves its value out.
    fn release(&mut self, idx: usize) -> T {
        self.links[idx].vacate(self.free_head);
        self.free_head = Some(idx);
        match self.values[idx].take() {
            Some(value) => value,
            None => unreachable!("corrupted list: live slot without a value"),
        }
    }

    fn link(&mut self, idx: usize, prev: Option<usize>, next: Option<usize>) {
        let slot = &mut self.links[idx];
        slot.set_prev(prev);
        slot.set_next(next);

        match prev {
            Some(prev) => self.links[prev].set_next(Some(idx)),
            None => self.head = Some(idx),
        }
        match next {
            Some(next) => self.links[next].set_prev(Some(idx)),
            None => self.tail = Some(idx),
        }
        self.len += 1;
    }

    fn unlink(&mut self, idx: usize) {
        let slot = self.links[idx];
        let (prev, next) = (slot.prev(), slot.next());

        match prev {
            Some(prev) => self.links[prev].set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.links[next].set_prev(prev),
            None => self.tail = prev,
        }
        self.len -= 1;
    }
}
