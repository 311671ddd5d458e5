//! This module has things for managing the grid,
//! which really means mapping between `(x, y)` coordinates
//! and the flat buffer that stores them.
//! Parallel phases work on disjoint slabs of whole rows.

mod buffers;
mod grid;
mod rows;

pub use buffers::*;
pub use grid::*;
pub use rows::*;
