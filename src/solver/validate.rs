use crate::domain::*;
use crate::error::*;
use crate::util::*;
use rayon::prelude::*;

/// Mean absolute value over the interior of `grid`.
/// Each task sums one row, partial sums are then combined.
pub fn l1_norm<F: StencilFloat>(grid: &Grid<F>, radius: usize) -> F {
    profiling::scope!("validate::l1_norm");
    let n = grid.size();
    debug_assert!(2 * radius < n);
    let interior = radius..n - radius;
    let total: F = grid
        .par_rows(interior.clone())
        .map(|(_, row)| row[interior.clone()].iter().map(|v| v.abs()).sum::<F>())
        .sum();
    let extent = F::from_count(interior.len());
    total / (extent * extent)
}

/// Expected L1 norm after `iterations` rounds.
/// Each round adds `COEF_X + COEF_Y` to every interior cell.
pub fn reference_norm<F: StencilFloat>(iterations: usize) -> F {
    F::from_count(iterations) * (F::from_real(COEF_X) + F::from_real(COEF_Y))
}

pub fn check_norm<F: StencilFloat>(norm: F, reference: F) -> Result<()> {
    let within = (norm - reference).abs() <= F::VALIDATION_EPSILON;
    if within {
        Ok(())
    } else {
        Err(StencilError::ValidationFailed {
            norm: norm.as_f64(),
            reference: reference.as_f64(),
        })
    }
}
