//! Shared element slots backing `View` and `Array`.
//!
//! Dispatch invocations may write a view or array concurrently, but the
//! dispatch contract guarantees each invocation addresses a disjoint set of
//! coordinates. `Slot` is the single place that turns that contract into
//! shared-mutation access; everything above it stays in safe code.

use std::cell::UnsafeCell;

/// One element of shared, shape-described storage.
///
/// Reads and writes go by value (`T: Copy`), so no reference into a slot
/// ever escapes.
#[repr(transparent)]
pub struct Slot<T>(UnsafeCell<T>);

// Safety: within one dispatch no two invocations write the same slot, and a
// slot written by one invocation is not read by another (the no-aliasing
// discipline of the dispatch contract). Outside a dispatch, access is
// single-threaded through the owning View/Array handles.
unsafe impl<T: Send> Sync for Slot<T> {}

impl<T: Copy> Slot<T> {
    pub fn new(value: T) -> Self {
        Slot(UnsafeCell::new(value))
    }

    pub fn get(&self) -> T {
        // Safety: see the `Sync` impl above.
        unsafe { *self.0.get() }
    }

    pub fn set(&self, value: T) {
        // Safety: see the `Sync` impl above.
        unsafe { *self.0.get() = value }
    }
}

/// Reinterpret a uniquely borrowed buffer as shared slots.
///
/// The `&mut` borrow guarantees the host holds no other live reference into
/// the buffer for as long as anything derived from the returned slice lives,
/// so handing out shared slots cannot alias an ordinary `&T`/`&mut T`.
pub(crate) fn as_slots<T>(storage: &mut [T]) -> &[Slot<T>] {
    // Safety: Slot<T> is repr(transparent) over UnsafeCell<T>, which has the
    // same layout as T.
    unsafe { &*(storage as *mut [T] as *const [Slot<T>]) }
}
