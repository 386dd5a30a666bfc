//! Error types reported by [`HandleList`](crate::HandleList).

use core::fmt;

use crate::Handle;

/// The error returned when an insertion is anchored on a handle that does not
/// reference a live element of the list, either because the element was
/// removed or because the handle was issued by another list.
///
/// The rejected value is handed back so the caller can retry elsewhere:
///
/// ```
/// use handle_list::HandleList;
///
/// let mut list = HandleList::from([1, 2]);
/// let h = list.front_node().unwrap();
/// list.remove_node(h);
///
/// let err = list.insert_after(h, 42).unwrap_err();
/// assert_eq!(err.handle(), h);
/// assert_eq!(err.into_value(), 42);
/// ```
pub struct StaleHandle<T> {
    handle: Handle,
    value: T,
}

impl<T> StaleHandle<T> {
    pub(crate) fn new(handle: Handle, value: T) -> Self {
        Self { handle, value }
    }

    /// Returns the handle that was rejected.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the value that could not be inserted.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for StaleHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaleHandle")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for StaleHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} does not reference a live element", self.handle)
    }
}

impl<T> std::error::Error for StaleHandle<T> {}
