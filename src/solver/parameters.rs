use crate::domain::Grid;
use crate::error::*;
use crate::par_stencil::Traversal;
use crate::stencil::StencilShape;
use crate::util::*;

include!(concat!(env!("OUT_DIR"), "/build_config.rs"));

/// Run configuration.
/// Everything is resolved here before any buffer is sized.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    /// Number of workers to request.
    pub threads: usize,

    /// Number of stencil applications.
    pub iterations: usize,

    /// Linear grid dimension `n`, the grid is `n x n`.
    pub grid_size: usize,

    /// Tile edge, tiling is only used when smaller than the interior.
    pub tile_size: usize,

    /// Stencil radius.
    pub radius: usize,

    /// Stencil geometry.
    pub shape: StencilShape,
}

impl std::default::Default for RunParameters {
    fn default() -> Self {
        RunParameters {
            threads: 1,
            iterations: 10,
            grid_size: 100,
            tile_size: 100,
            radius: RADIUS,
            shape: StencilShape::BUILD,
        }
    }
}

impl RunParameters {
    /// Check every value before allocation.
    /// `F` is needed to know whether the grid can be represented.
    pub fn validate<F: StencilFloat>(&self) -> Result<()> {
        if self.threads < 1 || self.threads > MAX_THREADS {
            return Err(StencilError::InvalidThreads(self.threads as i64));
        }
        if self.iterations < 1 {
            return Err(StencilError::InvalidIterations(self.iterations as i64));
        }
        if self.grid_size < 1 {
            return Err(StencilError::InvalidGridSize(self.grid_size as i64));
        }
        if self.radius < 1 {
            return Err(StencilError::RadiusTooSmall(self.radius));
        }
        if 2 * self.radius + 1 > self.grid_size {
            return Err(StencilError::RadiusExceedsGrid {
                radius: self.radius,
                grid_size: self.grid_size,
            });
        }
        Grid::<F>::checked_aabb(self.grid_size)?;
        if self.tile_size < 1 {
            return Err(StencilError::InvalidTileSize(self.tile_size as i64));
        }
        Ok(())
    }

    /// Side of the interior, `n - 2r`.
    pub fn interior_extent(&self) -> usize {
        self.grid_size - 2 * self.radius
    }

    /// Number of interior cells.
    pub fn active_points(&self) -> usize {
        self.interior_extent() * self.interior_extent()
    }

    pub fn traversal(&self) -> Traversal {
        Traversal::for_interior(self.tile_size, self.interior_extent())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn params(grid_size: usize, radius: usize) -> RunParameters {
        RunParameters {
            grid_size,
            tile_size: grid_size,
            radius,
            ..Default::default()
        }
    }

    #[test]
    fn default_is_valid() {
        let p = RunParameters::default();
        assert_eq!(p.validate::<f64>(), Ok(()));
        assert_eq!(p.validate::<f32>(), Ok(()));
        assert_eq!(p.traversal(), Traversal::Direct);
    }

    #[test]
    fn validate_errors() {
        assert_eq!(
            params(4, 2).validate::<f64>(),
            Err(StencilError::RadiusExceedsGrid {
                radius: 2,
                grid_size: 4
            })
        );
        assert_eq!(
            params(10, 0).validate::<f64>(),
            Err(StencilError::RadiusTooSmall(0))
        );

        let p = RunParameters {
            iterations: 0,
            ..params(10, 2)
        };
        assert_eq!(p.validate::<f64>(), Err(StencilError::InvalidIterations(0)));

        let p = RunParameters {
            threads: 0,
            ..params(10, 2)
        };
        assert_eq!(p.validate::<f64>(), Err(StencilError::InvalidThreads(0)));

        let p = RunParameters {
            threads: MAX_THREADS + 1,
            ..params(10, 2)
        };
        assert!(p.validate::<f64>().is_err());

        let p = RunParameters {
            tile_size: 0,
            ..params(10, 2)
        };
        assert_eq!(p.validate::<f64>(), Err(StencilError::InvalidTileSize(0)));

        let huge = i32::MAX as usize;
        assert_eq!(
            params(huge, 2).validate::<f64>(),
            Err(StencilError::GridTooLarge(huge))
        );
    }

    #[test]
    fn traversal_choice() {
        let p = RunParameters {
            tile_size: 3,
            ..params(10, 2)
        };
        assert_eq!(p.interior_extent(), 6);
        assert_eq!(p.active_points(), 36);
        assert_eq!(p.traversal(), Traversal::Tiled(3));

        let p = RunParameters {
            tile_size: 6,
            ..params(10, 2)
        };
        assert_eq!(p.traversal(), Traversal::Direct);
    }
}
