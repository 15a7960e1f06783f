use std::fmt;

use crate::error::LatticeError;
use crate::index::Index;
use crate::shape::Shape;
use crate::storage::{as_slots, Slot};
use crate::Result;

/// Non-owning, shape-described window over host storage.
///
/// A view borrows its storage: writes through any handle are immediately
/// visible through every other handle over the same storage and, once the
/// views are dropped, through the original host buffer. There is no internal
/// buffering and no copy-back step.
///
/// `Clone` produces another handle over the *same* storage, which is how a
/// view is captured by value into a dispatch operation. The lifetime ties
/// every handle to the host buffer, so a view can never outlive (or observe
/// a resize of) what it wraps.
///
/// # Examples
///
/// ```
/// use lattice_core::{Shape, Index, View};
///
/// let mut data = [4, 2, 6, 8, 9, 0];
/// let view = View::wrap(Shape::new(&[2, 3])?, &mut data)?;
/// view.set(&Index::new(&[1, 0]), 7)?;
/// assert_eq!(view.get(&Index::new(&[1, 0]))?, 7);
/// drop(view);
/// assert_eq!(data[3], 7); // shared storage, no copy-back needed
/// # Ok::<(), lattice_core::LatticeError>(())
/// ```
pub struct View<'a, T: Copy> {
    shape: Shape,
    slots: &'a [Slot<T>],
}

impl<T: Copy> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        View {
            shape: self.shape.clone(),
            slots: self.slots,
        }
    }
}

impl<'a, T: Copy> View<'a, T> {
    /// Wrap existing host storage.
    ///
    /// Fails with `InsufficientStorage` if the buffer holds fewer than
    /// `shape.size()` elements. Extra trailing elements are left outside the
    /// view.
    pub fn wrap(shape: Shape, storage: &'a mut [T]) -> Result<Self> {
        let needed = shape.size();
        if storage.len() < needed {
            return Err(LatticeError::InsufficientStorage {
                needed,
                got: storage.len(),
            });
        }
        Ok(Self {
            slots: &as_slots(storage)[..needed],
            shape,
        })
    }

    /// The shape this view was constructed with.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Length of one dimension, unchanged from construction.
    pub fn dim(&self, axis: usize) -> Result<usize> {
        self.shape.dim(axis)
    }

    /// Read the element at a coordinate. Rank- and bounds-checked.
    pub fn get(&self, index: &Index) -> Result<T> {
        let offset = self.shape.linearize(index)?;
        Ok(self.slots[offset].get())
    }

    /// Write the element at a coordinate. Rank- and bounds-checked.
    pub fn set(&self, index: &Index, value: T) -> Result<()> {
        let offset = self.shape.linearize(index)?;
        self.slots[offset].set(value);
        Ok(())
    }

    /// Read by row-major linear offset.
    pub fn get_linear(&self, offset: usize) -> Result<T> {
        self.check_linear(offset)?;
        Ok(self.slots[offset].get())
    }

    /// Write by row-major linear offset.
    pub fn set_linear(&self, offset: usize, value: T) -> Result<()> {
        self.check_linear(offset)?;
        self.slots[offset].set(value);
        Ok(())
    }

    fn check_linear(&self, offset: usize) -> Result<()> {
        if offset >= self.slots.len() {
            return Err(LatticeError::LinearOutOfBounds {
                offset,
                len: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Reduced-rank sub-view: select the `leading`-th hyperplane along the
    /// first dimension, sharing the same storage.
    ///
    /// Fails with `InvalidShape` on a rank-1 view (a rank-0 view does not
    /// exist) and `OutOfBounds` if `leading` is outside the first dimension.
    pub fn slice(&self, leading: isize) -> Result<View<'a, T>> {
        if self.rank() == 1 {
            return Err(LatticeError::InvalidShape {
                reason: "cannot slice a rank-1 view".into(),
            });
        }
        let dim0 = self.shape.dims()[0];
        if leading < 0 || leading as usize >= dim0 {
            return Err(LatticeError::OutOfBounds {
                axis: 0,
                index: leading,
                dim: dim0,
            });
        }
        let sub = Shape::from_dims(&self.shape.dims()[1..]);
        let plane = sub.size();
        let start = leading as usize * plane;
        Ok(View {
            shape: sub,
            slots: &self.slots[start..start + plane],
        })
    }
}

impl<T: Copy> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View(shape={}, size={})", self.shape, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[isize]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_wrap_insufficient_storage() {
        let mut data = [0i32; 5];
        let err = View::wrap(shape(&[2, 3]), &mut data).unwrap_err();
        assert_eq!(
            err,
            LatticeError::InsufficientStorage { needed: 6, got: 5 }
        );
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let mut data = [4, 5, 6, 7, 8, 9];
        let view = View::wrap(shape(&[2, 3]), &mut data).unwrap();
        assert_eq!(view.get(&Index::new(&[0, 1])).unwrap(), 5);
        view.set(&Index::new(&[1, 2]), 42).unwrap();
        assert_eq!(view.get(&Index::new(&[1, 2])).unwrap(), 42);
    }

    #[test]
    fn test_linear_access() {
        let mut data = [1, 2, 3, 4];
        let view = View::wrap(shape(&[4]), &mut data).unwrap();
        assert_eq!(view.get_linear(2).unwrap(), 3);
        view.set_linear(0, 10).unwrap();
        assert_eq!(view.get_linear(0).unwrap(), 10);
        assert!(matches!(
            view.get_linear(4),
            Err(LatticeError::LinearOutOfBounds { offset: 4, len: 4 })
        ));
    }

    #[test]
    fn test_bounds_checked() {
        let mut data = [0; 6];
        let view = View::wrap(shape(&[2, 3]), &mut data).unwrap();
        assert!(matches!(
            view.get(&Index::new(&[0, 3])),
            Err(LatticeError::OutOfBounds { .. })
        ));
        // Rank-exact: extra trailing components never flatten.
        assert!(matches!(
            view.get(&Index::new(&[0, 1, 13])),
            Err(LatticeError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_shared_visibility_across_handles() {
        let mut data = [0; 4];
        let a = View::wrap(shape(&[4]), &mut data).unwrap();
        let b = a.clone();
        a.set_linear(1, 99).unwrap();
        assert_eq!(b.get_linear(1).unwrap(), 99);
    }

    #[test]
    fn test_writes_reach_host_buffer() {
        let mut data = [0i32; 4];
        {
            let view = View::wrap(shape(&[4]), &mut data).unwrap();
            view.set_linear(2, 7).unwrap();
        }
        assert_eq!(data, [0, 0, 7, 0]);
    }

    #[test]
    fn test_slice_shares_storage() {
        let mut data: Vec<i32> = (0..24).collect();
        let view = View::wrap(shape(&[2, 3, 4]), &mut data).unwrap();
        let plane = view.slice(1).unwrap();
        assert_eq!(plane.shape().dims(), &[3, 4]);
        assert_eq!(plane.get(&Index::new(&[0, 0])).unwrap(), 12);

        plane.set(&Index::new(&[2, 3]), -1).unwrap();
        assert_eq!(view.get(&Index::new(&[1, 2, 3])).unwrap(), -1);
    }

    #[test]
    fn test_slice_errors() {
        let mut data = [0; 6];
        let view = View::wrap(shape(&[2, 3]), &mut data).unwrap();
        assert!(matches!(
            view.slice(2),
            Err(LatticeError::OutOfBounds { axis: 0, .. })
        ));

        let mut flat = [0; 3];
        let view = View::wrap(shape(&[3]), &mut flat).unwrap();
        assert!(matches!(
            view.slice(0),
            Err(LatticeError::InvalidShape { .. })
        ));
    }
}
