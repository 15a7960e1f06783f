use std::fmt;
use std::sync::Arc;

use crate::error::LatticeError;
use crate::index::Index;
use crate::shape::Shape;
use crate::storage::Slot;
use crate::Result;

/// Owning, shape-described buffer, deep-copied from its source.
///
/// After construction the array and its source are fully decoupled:
/// mutating one never affects the other. Results computed into an array are
/// invisible to the host until `materialize()` explicitly copies them back —
/// skipping that call silently discards everything a dispatch wrote. This is
/// the deliberate asymmetry with `View`, whose writes land in the host
/// buffer immediately.
///
/// `Clone` is a cheap handle to the *same* private buffer (for
/// capture-by-value dispatch), never a second deep copy.
///
/// # Examples
///
/// ```
/// use lattice_core::{Array, Index, Shape};
///
/// let source = vec![0, 1, 2, 3, 4];
/// let arr = Array::from_slice(Shape::new(&[5])?, &source)?;
/// arr.set(&Index::new(&[2]), 42)?;
/// assert_eq!(source[2], 2);                  // source untouched
/// assert_eq!(arr.materialize()[2], 42);      // explicit copy-back
/// # Ok::<(), lattice_core::LatticeError>(())
/// ```
pub struct Array<T: Copy> {
    shape: Shape,
    buf: Arc<[Slot<T>]>,
}

impl<T: Copy> Clone for Array<T> {
    fn clone(&self) -> Self {
        Array {
            shape: self.shape.clone(),
            buf: Arc::clone(&self.buf),
        }
    }
}

impl<T: Copy> Array<T> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Deep-copy a host slice into a new private buffer.
    ///
    /// Fails with `SizeMismatch` if the source length differs from
    /// `shape.size()` — an array is never partially filled or truncated.
    pub fn from_slice(shape: Shape, source: &[T]) -> Result<Self> {
        let expected = shape.size();
        if source.len() != expected {
            return Err(LatticeError::SizeMismatch {
                expected,
                got: source.len(),
            });
        }
        let buf: Arc<[Slot<T>]> = source.iter().map(|&v| Slot::new(v)).collect();
        Ok(Self { shape, buf })
    }

    /// Deep-copy a host range into a new private buffer.
    pub fn from_iter<I>(shape: Shape, source: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = source.into_iter().collect();
        Self::from_slice(shape, &items)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn dim(&self, axis: usize) -> Result<usize> {
        self.shape.dim(axis)
    }

    // =========================================================================
    // Element access
    // =========================================================================

    /// Read the element at a coordinate. Rank- and bounds-checked.
    pub fn get(&self, index: &Index) -> Result<T> {
        let offset = self.shape.linearize(index)?;
        Ok(self.buf[offset].get())
    }

    /// Write the element at a coordinate. Rank- and bounds-checked.
    pub fn set(&self, index: &Index, value: T) -> Result<()> {
        let offset = self.shape.linearize(index)?;
        self.buf[offset].set(value);
        Ok(())
    }

    /// Read by row-major linear offset.
    pub fn get_linear(&self, offset: usize) -> Result<T> {
        self.check_linear(offset)?;
        Ok(self.buf[offset].get())
    }

    /// Write by row-major linear offset.
    pub fn set_linear(&self, offset: usize, value: T) -> Result<()> {
        self.check_linear(offset)?;
        self.buf[offset].set(value);
        Ok(())
    }

    fn check_linear(&self, offset: usize) -> Result<()> {
        if offset >= self.buf.len() {
            return Err(LatticeError::LinearOutOfBounds {
                offset,
                len: self.buf.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    /// Copy the buffer back into a fresh host-side sequence, row-major.
    ///
    /// This is the only way results leave an array; nothing synchronizes
    /// implicitly after a dispatch. Does not mutate the array.
    pub fn materialize(&self) -> Vec<T> {
        self.buf.iter().map(Slot::get).collect()
    }
}

impl<T: Copy> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array(shape={}, size={})", self.shape, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[isize]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_size_mismatch() {
        let err = Array::from_slice(shape(&[2, 3]), &[1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(err, LatticeError::SizeMismatch { expected: 6, got: 5 });
        let err = Array::from_iter(shape(&[2]), 0..5).unwrap_err();
        assert_eq!(err, LatticeError::SizeMismatch { expected: 2, got: 5 });
    }

    #[test]
    fn test_isolation_from_source() {
        let source = vec![1, 2, 3, 4, 5];
        let arr = Array::from_slice(shape(&[5]), &source).unwrap();
        arr.set(&Index::new(&[0]), 100).unwrap();
        assert_eq!(source, vec![1, 2, 3, 4, 5]);
        assert_eq!(arr.get(&Index::new(&[0])).unwrap(), 100);
    }

    #[test]
    fn test_materialize_copies_out() {
        let arr = Array::from_iter(shape(&[2, 2]), [1, 2, 3, 4]).unwrap();
        assert_eq!(arr.rank(), 2);
        assert_eq!(arr.size(), 4);
        assert_eq!(arr.dim(1).unwrap(), 2);
        assert_eq!(arr.shape().dims(), &[2, 2]);
        arr.set(&Index::new(&[1, 1]), 40).unwrap();
        let out = arr.materialize();
        assert_eq!(out, vec![1, 2, 3, 40]);
        // materialize is a copy, not a drain
        assert_eq!(arr.materialize(), vec![1, 2, 3, 40]);
    }

    #[test]
    fn test_clone_is_a_handle() {
        let arr = Array::from_slice(shape(&[3]), &[0, 0, 0]).unwrap();
        let handle = arr.clone();
        handle.set_linear(1, 5).unwrap();
        assert_eq!(arr.get_linear(1).unwrap(), 5);
    }

    #[test]
    fn test_bounds_checked() {
        let arr = Array::from_slice(shape(&[2, 3]), &[0; 6]).unwrap();
        assert!(matches!(
            arr.get(&Index::new(&[2, 0])),
            Err(LatticeError::OutOfBounds { axis: 0, .. })
        ));
        assert!(matches!(
            arr.get(&Index::new(&[0, 0, 0])),
            Err(LatticeError::RankMismatch { .. })
        ));
        assert!(arr.get_linear(6).is_err());
    }
}
