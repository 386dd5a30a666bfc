//! Stable element handles.
//!
//! A [`Handle`] names a slot in the backing store together with the slot's
//! generation at the time the handle was issued and the identity of the list
//! that issued it. Removing an element bumps the slot's generation, so the
//! handle stops resolving even after the slot is recycled for a new element.
//! A handle presented to any other list never resolves.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Counter for list identity allocation.
static LIST_ID_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Allocates a fresh list identity. Identities are unique until the counter
/// wraps after 2^32 lists.
pub(crate) fn next_list_id() -> u32 {
    LIST_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A handle to an element of a [`HandleList`](crate::HandleList).
///
/// Handles are cheap to copy and compare. They stay valid across insertions
/// and removals of *other* elements and across sorting. A handle is only
/// accepted by the list that issued it (or a clone of that list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
    pub(crate) list: u32,
}

impl Handle {
    pub(crate) const fn new(list: u32, index: usize, generation: u32) -> Self {
        Self {
            index,
            generation,
            list,
        }
    }

    /// The slot index this handle points into.
    ///
    /// Slot indices say nothing about list order.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The slot generation this handle was issued for.
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@{})", self.index, self.generation)
    }
}
