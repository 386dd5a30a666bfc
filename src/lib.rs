//! # `handle-list` - Handle-Addressed Linked List
//!
//! A doubly linked list stored in a contiguous vector arena. Elements are
//! addressed through small, copyable [`Handle`]s instead of references, so a
//! caller can hold on to positions in the list across arbitrary insertions and
//! removals elsewhere.
//!
//! ## Guarantees
//!
//! - **O(1) link mutation**: push, pop, insert next to a handle and remove by
//!   handle touch at most the affected slot and its two neighbours.
//! - **Stable handles**: no operation relocates a live element. Growth of the
//!   backing store goes through `Vec`'s amortized doubling and never
//!   invalidates a handle.
//! - **No dangling**: every slot carries a generation counter that is bumped
//!   on each removal, so a handle to a removed element never resolves again,
//!   even after the slot is recycled for a new element. Handles also carry the
//!   identity of the issuing list and are rejected by every other list.
//! - **Borrow-checked cursors**: [`Cursor`] shares the list, [`CursorMut`]
//!   borrows it exclusively. Mixing a read-write cursor with any other access
//!   does not compile.
//!
//! ## Architecture
//!
//! 1. **Backing store** (`list` module): structure-of-arrays slots (links and
//!    generations in one vector, values in another), a free list threaded
//!    through vacant slots, and `head`/`tail` indices.
//! 2. **Cursors** ([`cursor`]): positions that include a *ghost* sentinel
//!    between tail and head, with traversal shared through [`CursorBase`].
//! 3. **Iterators** ([`iter`]): double-ended, exact-size traversals by
//!    reference, mutable reference, value and handle.
//!
//! ## Example
//!
//! ```
//! use handle_list::{CursorBase, HandleList};
//!
//! let mut list = HandleList::new();
//! let ten = list.push_back(10);
//! list.push_back(20);
//! list.push_front(5);
//!
//! list.insert_after(ten, 15).unwrap();
//! assert_eq!(list.to_vec(), vec![5, 10, 15, 20]);
//!
//! let mut cursor = list.cursor_at_mut(ten).unwrap();
//! cursor.move_next();
//! assert_eq!(cursor.remove(), Some(15));
//! assert_eq!(cursor.get(), Some(&20));
//!
//! assert_eq!(list.to_vec(), vec![5, 10, 20]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits `trace`-level events for structural operations such as
//!   backing store growth, `clear`, `append`, `compact` and sorting.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod macros;

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;

pub use cursor::{Cursor, CursorBase, CursorMut};
pub use error::StaleHandle;
pub use iter::{Handles, IntoIter, Iter, IterMut};
pub use list::{Handle, HandleList};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // A handle is an index plus two `u32` tags, nothing more.
    assert!(mem::size_of::<Handle>() <= mem::size_of::<usize>() + 8);
    // Links stay small enough that relinking never touches element storage.
    assert!(mem::size_of::<list::Slot>() <= mem::size_of::<usize>() * 6);
};
