use smallvec::SmallVec;
use std::fmt;

/// A coordinate within a shape's index space.
///
/// Components are signed so that out-of-range values (including negatives)
/// survive construction and are rejected at the access point instead of
/// being silently clamped. An `Index` is only meaningful relative to a
/// `Shape` of the same rank.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Index {
    offsets: SmallVec<[isize; 4]>,
}

impl Index {
    /// Create an index from signed components.
    pub fn new(offsets: &[isize]) -> Self {
        Self {
            offsets: SmallVec::from_slice(offsets),
        }
    }

    pub(crate) fn from_offsets(offsets: SmallVec<[isize; 4]>) -> Self {
        Self { offsets }
    }

    /// Number of components.
    pub fn rank(&self) -> usize {
        self.offsets.len()
    }

    /// Components as a slice.
    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    /// A single component, or `None` past the rank.
    pub fn get(&self, axis: usize) -> Option<isize> {
        self.offsets.get(axis).copied()
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({:?})", self.offsets.as_slice())
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.offsets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

impl From<&[isize]> for Index {
    fn from(offsets: &[isize]) -> Self {
        Index::new(offsets)
    }
}

impl From<Vec<isize>> for Index {
    fn from(offsets: Vec<isize>) -> Self {
        Index {
            offsets: SmallVec::from_vec(offsets),
        }
    }
}

macro_rules! impl_index_from_array {
    ($($n:expr),*) => {
        $(
            impl From<[isize; $n]> for Index {
                fn from(offsets: [isize; $n]) -> Self {
                    Index::new(&offsets)
                }
            }
        )*
    };
}

impl_index_from_array!(1, 2, 3, 4, 5, 6);
