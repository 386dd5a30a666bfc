//! Link storage for the backing store.
//!
//! Links live apart from values (structure-of-arrays) so that relinking and
//! traversal only touch the small `Slot` records.

/// Link state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    Occupied {
        prev: Option<usize>,
        next: Option<usize>,
    },
    /// Next free slot index.
    Free(Option<usize>),
}

/// One entry of the link vector.
///
/// Generation parity tracks the state: even = occupied, odd = free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) link: Link,
}

impl Slot {
    /// A fresh, unlinked, occupied slot.
    pub(crate) const fn occupied() -> Self {
        Self {
            generation: 0,
            link: Link::Occupied {
                prev: None,
                next: None,
            },
        }
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        matches!(self.link, Link::Occupied { .. })
    }

    #[inline]
    pub(crate) fn prev(&self) -> Option<usize> {
        match self.link {
            Link::Occupied { prev, .. } => prev,
            Link::Free(_) => unreachable!("corrupted list: free slot in live chain"),
        }
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<usize> {
        match self.link {
            Link::Occupied { next, .. } => next,
            Link::Free(_) => unreachable!("corrupted list: free slot in live chain"),
        }
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, to: Option<usize>) {
        if let Link::Occupied { prev, .. } = &mut self.link {
            *prev = to;
        }
    }

    #[inline]
    pub(crate) fn set_next(&mut self, to: Option<usize>) {
        if let Link::Occupied { next, .. } = &mut self.link {
            *next = to;
        }
    }

    /// Turns a free slot back into an unlinked occupied one. Returns the next
    /// free slot index that this slot was chained to.
    #[inline]
    pub(crate) fn occupy(&mut self) -> Option<usize> {
        let next_free = match self.link {
            Link::Free(next_free) => next_free,
            Link::Occupied { .. } => unreachable!("corrupted free list: occupied slot"),
        };
        self.generation = self.generation.wrapping_add(1);
        self.link = Link::Occupied {
            prev: None,
            next: None,
        };
        next_free
    }

    /// Marks an occupied slot as free and chains it to `next_free`.
    #[inline]
    pub(crate) fn vacate(&mut self, next_free: Option<usize>) {
        debug_assert!(self.is_live(), "vacating a free slot");
        self.generation = self.generation.wrapping_add(1);
        self.link = Link::Free(next_free);
    }
}
