mod aabb;
mod float;
pub mod indexing;
pub use aabb::*;
pub use float::*;

pub use nalgebra::{matrix, vector};
pub use num_traits::{Float, One, Zero};

pub type Coord<const GRID_DIMENSION: usize> =
    nalgebra::SVector<i32, { GRID_DIMENSION }>;
pub type Bounds<const GRID_DIMENSION: usize> =
    nalgebra::SMatrix<i32, { GRID_DIMENSION }, 2>;
