//! Stencil weights.
//! A stencil here is a fixed, linear, space-invariant operator:
//! a table of weights indexed by neighbor offset.

mod shape;
mod weights;

pub use shape::*;
pub use weights::*;
