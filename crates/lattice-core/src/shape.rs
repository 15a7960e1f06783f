use smallvec::SmallVec;
use std::fmt;

use crate::error::LatticeError;
use crate::index::Index;
use crate::Result;

/// N-dimensional extent with stack-allocated storage for ≤4 dimensions.
///
/// A shape is fixed at construction: rank ≥ 1, every dimension length ≥ 0.
/// Linearization is row-major (last dimension varies fastest) and that order
/// is part of the contract — it determines the element order a flattened
/// buffer, a materialized `Array`, and `indices()` all observe.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: SmallVec<[usize; 4]>,
}

impl Shape {
    /// Create a shape from signed dimension lengths.
    ///
    /// Fails with `InvalidShape` if `dims` is empty or any length is
    /// negative. Zero-length dimensions are valid and make `size()` zero.
    pub fn new(dims: &[isize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(LatticeError::InvalidShape {
                reason: "shape must have at least one dimension".into(),
            });
        }
        if let Some(&d) = dims.iter().find(|&&d| d < 0) {
            return Err(LatticeError::InvalidShape {
                reason: format!("negative dimension length {d}"),
            });
        }
        Ok(Self {
            dims: dims.iter().map(|&d| d as usize).collect(),
        })
    }

    /// Build a shape from dimensions already known to be valid.
    pub(crate) fn from_dims(dims: &[usize]) -> Self {
        debug_assert!(!dims.is_empty());
        Self {
            dims: SmallVec::from_slice(dims),
        }
    }

    /// Number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Dimension lengths as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Length of a specific dimension.
    pub fn dim(&self, axis: usize) -> Result<usize> {
        self.dims
            .get(axis)
            .copied()
            .ok_or(LatticeError::OutOfBounds {
                axis,
                index: axis as isize,
                dim: self.dims.len(),
            })
    }

    /// Total number of elements. Zero if any dimension is zero.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major contiguous strides: `stride[rank-1] = 1`,
    /// `stride[i] = stride[i+1] * dims[i+1]`.
    pub fn strides(&self) -> SmallVec<[usize; 4]> {
        let rank = self.dims.len();
        let mut strides = SmallVec::from_elem(0usize, rank);
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Map a coordinate to its row-major linear offset.
    ///
    /// Fails with `RankMismatch` if the index carries more or fewer
    /// components than the shape's rank — extra components are never
    /// reinterpreted as a flat walk through memory — and with `OutOfBounds`
    /// if any component falls outside `[0, dims[i])`.
    pub fn linearize(&self, index: &Index) -> Result<usize> {
        if index.rank() != self.rank() {
            return Err(LatticeError::RankMismatch {
                expected: self.rank(),
                got: index.rank(),
            });
        }
        let strides = self.strides();
        let mut offset = 0usize;
        for (axis, (&c, &stride)) in index.offsets().iter().zip(strides.iter()).enumerate() {
            let dim = self.dims[axis];
            if c < 0 || c as usize >= dim {
                return Err(LatticeError::OutOfBounds {
                    axis,
                    index: c,
                    dim,
                });
            }
            offset += c as usize * stride;
        }
        Ok(offset)
    }

    /// Map a row-major linear offset back to its coordinate.
    pub fn delinearize(&self, linear: usize) -> Result<Index> {
        if linear >= self.size() {
            return Err(LatticeError::LinearOutOfBounds {
                offset: linear,
                len: self.size(),
            });
        }
        Ok(self.delinearize_unchecked(linear))
    }

    fn delinearize_unchecked(&self, linear: usize) -> Index {
        let strides = self.strides();
        let mut remaining = linear;
        let mut offsets: SmallVec<[isize; 4]> = SmallVec::with_capacity(self.rank());
        for &stride in strides.iter() {
            offsets.push((remaining / stride) as isize);
            remaining %= stride;
        }
        Index::from_offsets(offsets)
    }

    /// Iterate every coordinate of this shape in row-major enumeration
    /// order. Yields exactly `size()` items.
    pub fn indices(&self) -> Indices<'_> {
        Indices {
            shape: self,
            next: 0,
            total: self.size(),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.dims.as_slice())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Iterator over all coordinates of a shape, row-major.
pub struct Indices<'a> {
    shape: &'a Shape,
    next: usize,
    total: usize,
}

impl Iterator for Indices<'_> {
    type Item = Index;

    fn next(&mut self) -> Option<Index> {
        if self.next == self.total {
            return None;
        }
        let idx = self.shape.delinearize_unchecked(self.next);
        self.next += 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(s.rank(), 3);
        assert_eq!(s.size(), 24);
        assert_eq!(s.dims(), &[2, 3, 4]);
        assert_eq!(s.dim(1).unwrap(), 3);
        assert!(s.dim(3).is_err());
    }

    #[test]
    fn test_invalid_shape() {
        let err = Shape::new(&[-1, 3]).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidShape { .. }));
        assert!(matches!(
            Shape::new(&[]),
            Err(LatticeError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_zero_dimension() {
        let s = Shape::new(&[3, 0, 2]).unwrap();
        assert_eq!(s.size(), 0);
        assert_eq!(s.indices().count(), 0);
    }

    #[test]
    fn test_strides() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        assert_eq!(s.strides().as_slice(), &[12, 4, 1]);
    }

    #[test]
    fn test_linearize_row_major() {
        let s = Shape::new(&[2, 3]).unwrap();
        let order = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)];
        for (linear, &(r, c)) in order.iter().enumerate() {
            assert_eq!(s.linearize(&Index::new(&[r, c])).unwrap(), linear);
        }
    }

    #[test]
    fn test_linearize_injective_in_range() {
        let s = Shape::new(&[3, 4, 2]).unwrap();
        let mut seen = vec![false; s.size()];
        for idx in s.indices() {
            let linear = s.linearize(&idx).unwrap();
            assert!(linear < s.size());
            assert!(!seen[linear], "duplicate linear offset {linear}");
            seen[linear] = true;
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn test_linearize_out_of_bounds() {
        let s = Shape::new(&[2, 3]).unwrap();
        let err = s.linearize(&Index::new(&[0, 3])).unwrap_err();
        assert!(matches!(err, LatticeError::OutOfBounds { axis: 1, .. }));
        let err = s.linearize(&Index::new(&[-1, 0])).unwrap_err();
        assert!(matches!(err, LatticeError::OutOfBounds { axis: 0, .. }));
    }

    #[test]
    fn test_linearize_rank_exact() {
        let s = Shape::new(&[2, 3]).unwrap();
        // An in-range leading prefix with extra trailing components must
        // fail, never count through memory as if flattened.
        let err = s.linearize(&Index::new(&[0, 1, 1])).unwrap_err();
        assert_eq!(
            err,
            LatticeError::RankMismatch {
                expected: 2,
                got: 3
            }
        );
        assert!(s.linearize(&Index::new(&[1])).is_err());
    }

    #[test]
    fn test_delinearize_roundtrip() {
        let s = Shape::new(&[2, 3, 4]).unwrap();
        for linear in 0..s.size() {
            let idx = s.delinearize(linear).unwrap();
            assert_eq!(s.linearize(&idx).unwrap(), linear);
        }
        assert!(s.delinearize(s.size()).is_err());
    }

    #[test]
    fn test_indices_enumeration() {
        let s = Shape::new(&[2, 2]).unwrap();
        let all: Vec<Index> = s.indices().collect();
        assert_eq!(
            all,
            vec![
                Index::new(&[0, 0]),
                Index::new(&[0, 1]),
                Index::new(&[1, 0]),
                Index::new(&[1, 1]),
            ]
        );
        assert_eq!(s.indices().len(), 4);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(&[2, 3]).unwrap();
        assert_eq!(format!("{s}"), "[2, 3]");
        assert_eq!(format!("{s:?}"), "Shape([2, 3])");
    }
}
