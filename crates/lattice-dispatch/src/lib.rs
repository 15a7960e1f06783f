//! # lattice-dispatch
//!
//! Execution domains and the data-parallel dispatch primitive for lattice.
//!
//! Provides:
//! - `Domain`: an explicit handle selecting where dispatched operations run
//!   (the sequential host, or a dedicated accelerator worker pool)
//! - per-index accelerator pools, lazily built and cached
//! - `parallel_for_each`: blocking, unordered fan-out of one operation over
//!   every coordinate in a `Shape`

pub mod dispatch;
pub mod domain;
pub mod pool;

pub use dispatch::parallel_for_each;
pub use domain::Domain;

pub use lattice_core::{Array, Index, LatticeError, Result, Shape, View};
