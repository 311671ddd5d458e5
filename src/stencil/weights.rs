use super::StencilShape;
use crate::error::*;
use crate::util::*;
use nalgebra::DMatrix;

/// Coefficients of a discrete divergence operator.
/// The table is `(2r + 1) x (2r + 1)`, indexed by offset in `[-r, r]^2`.
/// Weight `(dx, dy)` multiplies the input at `(x + dx, y + dy)`.
/// Coefficients sum to zero and `w(-dx, -dy) == -w(dx, dy)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix<F: StencilFloat> {
    radius: usize,
    shape: StencilShape,
    weights: DMatrix<F>,
}

impl<F: StencilFloat> WeightMatrix<F> {
    pub fn new(radius: usize, shape: StencilShape) -> Result<Self> {
        if radius < 1 {
            return Err(StencilError::RadiusTooSmall(radius));
        }
        let width = 2 * radius + 1;
        let mut result = WeightMatrix {
            radius,
            shape,
            weights: DMatrix::zeros(width, width),
        };
        match shape {
            StencilShape::Star => result.fill_star(),
            StencilShape::Compact => result.fill_compact(),
        }
        Ok(result)
    }

    /// Also checks that an `n x n` grid can host one full footprint.
    pub fn for_grid(
        radius: usize,
        shape: StencilShape,
        grid_size: usize,
    ) -> Result<Self> {
        let result = Self::new(radius, shape)?;
        if 2 * radius + 1 > grid_size {
            return Err(StencilError::RadiusExceedsGrid { radius, grid_size });
        }
        Ok(result)
    }

    fn fill_star(&mut self) {
        let r = self.radius as f64;
        for k in 1..=self.radius as i32 {
            let w = F::from_real(1.0 / (2.0 * k as f64 * r));
            self.set(0, k, w);
            self.set(k, 0, w);
            self.set(0, -k, -w);
            self.set(-k, 0, -w);
        }
    }

    // Concentric rings at Chebyshev distance jj.
    fn fill_compact(&mut self) {
        let r = self.radius as f64;
        for jj in 1..=self.radius as i32 {
            let jj_f = jj as f64;
            let side = F::from_real(1.0 / (4.0 * jj_f * (2.0 * jj_f - 1.0) * r));
            for ii in (-jj + 1)..jj {
                self.set(ii, jj, side);
                self.set(ii, -jj, -side);
                self.set(jj, ii, side);
                self.set(-jj, ii, -side);
            }
            let corner = F::from_real(1.0 / (4.0 * jj_f * r));
            self.set(jj, jj, corner);
            self.set(-jj, -jj, -corner);
        }
    }

    #[inline]
    fn table_index(&self, dx: i32, dy: i32) -> (usize, usize) {
        let r = self.radius as i32;
        debug_assert!(
            dx.abs() <= r && dy.abs() <= r,
            "offset ({dx}, {dy}) outside radius {r}"
        );
        ((dx + r) as usize, (dy + r) as usize)
    }

    fn set(&mut self, dx: i32, dy: i32, value: F) {
        let index = self.table_index(dx, dy);
        self.weights[index] = value;
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn shape(&self) -> StencilShape {
        self.shape
    }

    #[inline]
    pub fn weight(&self, dx: i32, dy: i32) -> F {
        self.weights[self.table_index(dx, dy)]
    }

    pub fn stencil_size(&self) -> usize {
        self.shape.stencil_size(self.radius)
    }

    /// Floating point operations needed for one grid point.
    pub fn flops_per_point(&self) -> usize {
        2 * self.stencil_size() - 1
    }

    /// Offsets and weights of every point in the support.
    pub fn support(&self) -> Vec<(Coord<2>, F)> {
        let r = self.radius as i32;
        let mut result = Vec::with_capacity(self.stencil_size());
        for dx in -r..=r {
            for dy in -r..=r {
                let in_support = match self.shape {
                    StencilShape::Star => dx == 0 || dy == 0,
                    StencilShape::Compact => true,
                };
                if in_support {
                    result.push((vector![dx, dy], self.weight(dx, dy)));
                }
            }
        }
        result
    }

    /// Weights `w(0, dy)` for `dy` in `[-r, r]`.
    pub fn row_weights(&self) -> Vec<F> {
        let r = self.radius as i32;
        (-r..=r).map(|dy| self.weight(0, dy)).collect()
    }

    /// Weights `w(dx, 0)` for `dx` in `[-r, r]`.
    pub fn column_weights(&self) -> Vec<F> {
        let r = self.radius as i32;
        (-r..=r).map(|dx| self.weight(dx, 0)).collect()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const SHAPES: [StencilShape; 2] = [StencilShape::Star, StencilShape::Compact];

    #[test]
    fn radius_errors() {
        assert_eq!(
            WeightMatrix::<f64>::new(0, StencilShape::Star),
            Err(StencilError::RadiusTooSmall(0))
        );
        assert_eq!(
            WeightMatrix::<f64>::for_grid(2, StencilShape::Star, 4),
            Err(StencilError::RadiusExceedsGrid {
                radius: 2,
                grid_size: 4
            })
        );
        assert!(WeightMatrix::<f64>::for_grid(2, StencilShape::Compact, 5).is_ok());
    }

    #[test]
    fn star_weights() {
        let w = WeightMatrix::<f64>::new(2, StencilShape::Star).unwrap();
        assert_approx_eq!(f64, w.weight(0, 0), 0.0);
        assert_approx_eq!(f64, w.weight(1, 0), 0.25);
        assert_approx_eq!(f64, w.weight(0, 1), 0.25);
        assert_approx_eq!(f64, w.weight(2, 0), 0.125);
        assert_approx_eq!(f64, w.weight(0, -2), -0.125);
        assert_approx_eq!(f64, w.weight(-1, 0), -0.25);
        assert_approx_eq!(f64, w.weight(1, 1), 0.0);
        assert_approx_eq!(f64, w.weight(-2, 2), 0.0);
        assert_eq!(w.support().len(), 9);
        assert_eq!(w.stencil_size(), 9);
        assert_eq!(w.flops_per_point(), 17);
        assert_eq!(w.row_weights(), vec![-0.125, -0.25, 0.0, 0.25, 0.125]);
        assert_eq!(w.column_weights(), w.row_weights());
    }

    #[test]
    fn compact_weights() {
        let w = WeightMatrix::<f64>::new(2, StencilShape::Compact).unwrap();
        // Ring 1: sides 1 / (4 * 1 * 1 * 2), corner 1 / (4 * 1 * 2)
        assert_approx_eq!(f64, w.weight(0, 1), 0.125);
        assert_approx_eq!(f64, w.weight(1, 0), 0.125);
        assert_approx_eq!(f64, w.weight(0, -1), -0.125);
        assert_approx_eq!(f64, w.weight(1, 1), 0.125);
        assert_approx_eq!(f64, w.weight(-1, -1), -0.125);
        assert_approx_eq!(f64, w.weight(1, -1), 0.0);
        assert_approx_eq!(f64, w.weight(-1, 1), 0.0);
        // Ring 2: sides 1 / (4 * 2 * 3 * 2), corner 1 / (4 * 2 * 2)
        assert_approx_eq!(f64, w.weight(1, 2), 1.0 / 48.0);
        assert_approx_eq!(f64, w.weight(-1, 2), 1.0 / 48.0);
        assert_approx_eq!(f64, w.weight(2, -1), 1.0 / 48.0);
        assert_approx_eq!(f64, w.weight(-2, 0), -1.0 / 48.0);
        assert_approx_eq!(f64, w.weight(2, 2), 1.0 / 16.0);
        assert_approx_eq!(f64, w.weight(-2, -2), -1.0 / 16.0);
        assert_approx_eq!(f64, w.weight(2, -2), 0.0);
        assert_eq!(w.support().len(), 25);
        assert_eq!(w.flops_per_point(), 49);
    }

    #[test]
    fn weights_sum_to_zero() {
        for shape in SHAPES {
            for radius in 1..=8 {
                let w = WeightMatrix::<f64>::new(radius, shape).unwrap();
                let sum: f64 = w.support().iter().map(|(_, w)| *w).sum();
                assert_approx_eq!(f64, sum, 0.0, epsilon = 1e-14);

                let w = WeightMatrix::<f32>::new(radius, shape).unwrap();
                let sum: f32 = w.support().iter().map(|(_, w)| *w).sum();
                assert_approx_eq!(f32, sum, 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn weights_antisymmetric() {
        for shape in SHAPES {
            for radius in 1..=8 {
                let w = WeightMatrix::<f64>::new(radius, shape).unwrap();
                let r = radius as i32;
                for dx in -r..=r {
                    for dy in -r..=r {
                        assert_eq!(w.weight(dx, dy), -w.weight(-dx, -dy));
                    }
                }
            }
        }
    }

    // Applied to the ramp x + y every ring contributes 2 / r,
    // so the full operator returns 2 for any radius.
    #[test]
    fn ramp_response() {
        for shape in SHAPES {
            for radius in 1..=6 {
                let w = WeightMatrix::<f64>::new(radius, shape).unwrap();
                let response: f64 = w
                    .support()
                    .iter()
                    .map(|(offset, weight)| {
                        weight * (offset[0] as f64 + offset[1] as f64)
                    })
                    .sum();
                assert_approx_eq!(f64, response, 2.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn star_support_is_cross() {
        let w = WeightMatrix::<f32>::new(3, StencilShape::Star).unwrap();
        for (offset, _) in w.support() {
            assert!(offset[0] == 0 || offset[1] == 0);
        }
        let r = 3;
        for dx in -r..=r {
            for dy in -r..=r {
                if dx != 0 && dy != 0 {
                    assert_eq!(w.weight(dx, dy), 0.0);
                }
            }
        }
    }
}
