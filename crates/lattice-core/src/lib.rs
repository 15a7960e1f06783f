//! # lattice-core
//!
//! Core data model for the lattice data-parallel library.
//!
//! Provides:
//! - `Shape`: immutable N-dimensional extents with row-major linearization
//! - `Index`: signed coordinates into a shape's index space
//! - `View`: non-owning window over host storage, shared mutation visibility
//! - `Array`: owning buffer, deep-copied in, explicitly materialized back out

pub mod array;
pub mod error;
pub mod index;
pub mod shape;
pub mod storage;
pub mod view;

pub use array::Array;
pub use error::LatticeError;
pub use index::Index;
pub use shape::Shape;
pub use view::View;

pub type Result<T> = std::result::Result<T, LatticeError>;
