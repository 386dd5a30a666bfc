//! Cursors over a [`HandleList`].
//!
//! A cursor sits either on an element or on the *ghost* position, a single
//! sentinel that lies both past the tail and before the head. Stepping off
//! either end lands on the ghost; stepping again from the ghost wraps around
//! to the opposite end.
//!
//! [`Cursor`] borrows the list shared and [`CursorMut`] borrows it exclusively,
//! so any number of read cursors may coexist but a read-write cursor excludes
//! every other access for its lifetime. Both share their traversal through
//! [`CursorBase`].

use core::fmt;

use crate::list::{Handle, HandleList};

mod sealed {
    use crate::list::{Handle, HandleList};

    /// Position state the traversal methods of `CursorBase` are written over.
    pub trait Position<T> {
        fn list(&self) -> &HandleList<T>;
        fn current(&self) -> Option<Handle>;
        fn set_current(&mut self, to: Option<Handle>);
    }
}

/// Traversal shared by [`Cursor`] and [`CursorMut`].
///
/// Movement methods return the handle the cursor lands on, or `None` when it
/// lands on the ghost position (always the case for an empty list).
pub trait CursorBase<T>: sealed::Position<T> {
    /// Returns the handle the cursor is on, or `None` on the ghost position.
    #[inline]
    fn node(&self) -> Option<Handle> {
        self.current()
    }

    /// Returns a reference to the element under the cursor.
    #[inline]
    fn get(&self) -> Option<&T> {
        self.current().and_then(|node| self.list().get(node))
    }

    /// Returns the element after the cursor without moving. From the ghost
    /// position this is the first element.
    fn peek_next(&self) -> Option<&T> {
        let list = self.list();
        match self.current() {
            Some(node) => list.next_value(node),
            None => list.front(),
        }
    }

    /// Returns the element before the cursor without moving. From the ghost
    /// position this is the last element.
    fn peek_prev(&self) -> Option<&T> {
        let list = self.list();
        match self.current() {
            Some(node) => list.prev_value(node),
            None => list.back(),
        }
    }

    /// Steps to the next element. Past the tail the cursor lands on the ghost;
    /// from the ghost it wraps to the head.
    ///
    /// ```
    /// use handle_list::{CursorBase, HandleList};
    ///
    /// let list = HandleList::from([1, 2, 3]);
    /// let mut cursor = list.cursor_at(list.back_node().unwrap()).unwrap();
    ///
    /// assert_eq!(cursor.move_next(), None);
    /// assert_eq!(cursor.move_next(), list.front_node());
    /// assert_eq!(cursor.get(), Some(&1));
    /// ```
    fn move_next(&mut self) -> Option<Handle> {
        let to = match self.current() {
            Some(node) => self.list().next_node(node),
            None => self.list().front_node(),
        };
        self.set_current(to);
        to
    }

    /// Steps to the previous element. Before the head the cursor lands on the
    /// ghost; from the ghost it wraps to the tail.
    fn move_prev(&mut self) -> Option<Handle> {
        let to = match self.current() {
            Some(node) => self.list().prev_node(node),
            None => self.list().back_node(),
        };
        self.set_current(to);
        to
    }

    /// Jumps to `node`. Returns `false` and stays put if the handle is stale.
    fn move_to(&mut self, node: Handle) -> bool {
        if self.list().contains_node(node) {
            self.set_current(Some(node));
            true
        } else {
            false
        }
    }

    /// Jumps to the first element. Lands on the ghost if the list is empty.
    fn move_to_start(&mut self) -> Option<Handle> {
        let to = self.list().front_node();
        self.set_current(to);
        to
    }

    /// Jumps to the last element. Lands on the ghost if the list is empty.
    fn move_to_end(&mut self) -> Option<Handle> {
        let to = self.list().back_node();
        self.set_current(to);
        to
    }

    /// Calls [`move_next`](Self::move_next) up to `n` times. Stops on the ghost
    /// position and returns `None` if a step lands there; otherwise returns the
    /// handle reached.
    ///
    /// ```
    /// use handle_list::{CursorBase, HandleList};
    ///
    /// let list = HandleList::from([1, 2, 3, 4]);
    /// let mut cursor = list.cursor();
    ///
    /// let third = cursor.forward(2).unwrap();
    /// assert_eq!(list[third], 3);
    ///
    /// assert_eq!(cursor.forward(10), None);
    /// assert_eq!(cursor.node(), None);
    /// ```
    fn forward(&mut self, n: usize) -> Option<Handle> {
        for _ in 0..n {
            self.move_next()?;
        }
        self.current()
    }

    /// Calls [`move_prev`](Self::move_prev) up to `n` times, with the same
    /// stopping rule as [`forward`](Self::forward).
    fn backward(&mut self, n: usize) -> Option<Handle> {
        for _ in 0..n {
            self.move_prev()?;
        }
        self.current()
    }
}

/// A read-only cursor. Created by [`HandleList::cursor`] and
/// [`HandleList::cursor_at`].
pub struct Cursor<'a, T> {
    list: &'a HandleList<T>,
    current: Option<Handle>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a HandleList<T>, current: Option<Handle>) -> Self {
        Self { list, current }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            current: self.current,
        }
    }
}

impl<T> sealed::Position<T> for Cursor<'_, T> {
    #[inline]
    fn list(&self) -> &HandleList<T> {
        self.list
    }

    #[inline]
    fn current(&self) -> Option<Handle> {
        self.current
    }

    #[inline]
    fn set_current(&mut self, to: Option<Handle>) {
        self.current = to;
    }
}

impl<T> CursorBase<T> for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current)
            .field("len", &self.list.len())
            .finish()
    }
}

/// A read-write cursor. Created by [`HandleList::cursor_mut`] and
/// [`HandleList::cursor_at_mut`].
///
/// Besides traversal it can edit the element under it and insert or remove
/// elements around its position in O(1).
pub struct CursorMut<'a, T> {
    list: &'a mut HandleList<T>,
    current: Option<Handle>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut HandleList<T>, current: Option<Handle>) -> Self {
        Self { list, current }
    }

    /// Returns `true` if the underlying list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns a mutable reference to the element under the cursor.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let node = self.current?;
        self.list.get_mut(node)
    }

    /// Inserts `value` before the cursor and returns its handle. The cursor
    /// does not move. On the ghost position the value goes to the back.
    pub fn insert_before(&mut self, value: T) -> Handle {
        match self.index() {
            Some(idx) => self.list.insert_before_index(idx, value),
            None => self.list.push_back(value),
        }
    }

    /// Inserts `value` after the cursor and returns its handle. The cursor
    /// does not move. On the ghost position the value goes to the front.
    pub fn insert_after(&mut self, value: T) -> Handle {
        match self.index() {
            Some(idx) => self.list.insert_after_index(idx, value),
            None => self.list.push_front(value),
        }
    }

    /// Removes the element under the cursor and returns it. The cursor moves
    /// to the following element, or to the preceding one if it removed the
    /// tail, or to the ghost if the list became empty. Returns `None` on the
    /// ghost position.
    ///
    /// ```
    /// use handle_list::{CursorBase, HandleList};
    ///
    /// let mut list = HandleList::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut();
    /// cursor.move_to_end();
    ///
    /// assert_eq!(cursor.remove(), Some(3));
    /// assert_eq!(cursor.get(), Some(&2));
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        let idx = self.index()?;
        let links = self.list.links[idx];
        self.current = links
            .next()
            .or(links.prev())
            .map(|to| self.list.handle_of(to));
        Some(self.list.take(idx))
    }

    /// Slot index of the element under the cursor. The exclusive borrow keeps
    /// `current` live for the cursor's lifetime.
    #[inline]
    fn index(&self) -> Option<usize> {
        let node = self.current?;
        debug_assert!(self.list.contains_node(node), "cursor on a stale handle");
        Some(node.index)
    }
}

impl<T> sealed::Position<T> for CursorMut<'_, T> {
    #[inline]
    fn list(&self) -> &HandleList<T> {
        self.list
    }

    #[inline]
    fn current(&self) -> Option<Handle> {
        self.current
    }

    #[inline]
    fn set_current(&mut self, to: Option<Handle>) {
        self.current = to;
    }
}

impl<T> CursorBase<T> for CursorMut<'_, T> {}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.current)
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_through_the_ghost() {
        let list = HandleList::from([1, 2, 3]);
        let mut cursor = list.cursor();

        assert_eq!(cursor.move_prev(), None);
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor.move_prev(), list.back_node());
        assert_eq!(cursor.get(), Some(&3));
    }

    #[test]
    fn empty_list_stays_on_the_ghost() {
        let list: HandleList<i32> = HandleList::new();
        let mut cursor = list.cursor();
        assert_eq!(cursor.node(), None);
        assert_eq!(cursor.move_next(), None);
        assert_eq!(cursor.move_prev(), None);
        assert_eq!(cursor.move_to_start(), None);
        assert_eq!(cursor.move_to_end(), None);
        assert_eq!(cursor.forward(3), None);
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn peeks_are_ghost_aware() {
        let list = HandleList::from([1, 2, 3]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.peek_prev(), None);
        assert_eq!(cursor.peek_next(), Some(&2));

        cursor.move_prev();
        assert_eq!(cursor.peek_next(), Some(&1));
        assert_eq!(cursor.peek_prev(), Some(&3));
    }

    #[test]
    fn read_cursors_coexist() {
        let list = HandleList::from([1, 2]);
        let a = list.cursor();
        let mut b = a.clone();
        b.move_next();
        assert_eq!(a.get(), Some(&1));
        assert_eq!(b.get(), Some(&2));
    }

    #[test]
    fn ghost_inserts_go_to_the_ends() {
        let mut list = HandleList::from([2]);
        let mut cursor = list.cursor_mut();
        cursor.move_next();
        assert_eq!(cursor.node(), None);

        cursor.insert_before(3);
        cursor.insert_after(1);
        assert_eq!(cursor.node(), None);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn remove_last_element_lands_on_ghost() {
        let mut list = HandleList::from([7]);
        let mut cursor = list.cursor_mut();
        assert_eq!(cursor.remove(), Some(7));
        assert_eq!(cursor.node(), None);
        assert!(cursor.is_empty());
        assert_eq!(cursor.remove(), None);
    }
}
