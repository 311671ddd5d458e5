use super::*;
use crate::error::*;
use crate::par_slice;
use crate::util::*;

/// Slope of the initial input ramp along x.
pub const COEF_X: f64 = 1.0;

/// Slope of the initial input ramp along y.
pub const COEF_Y: f64 = 1.0;

/// The input and output grid of a run.
/// Both are allocated once and released when this is dropped.
pub struct GridBuffers<F: StencilFloat> {
    pub input: Grid<F>,
    pub output: Grid<F>,
}

impl<F: StencilFloat> GridBuffers<F> {
    pub fn try_new(n: usize) -> Result<Self> {
        let input = Grid::try_new(n)?;
        let output = Grid::try_new(n)?;
        Ok(GridBuffers { input, output })
    }

    pub fn size(&self) -> usize {
        self.input.size()
    }

    /// Seed input with `COEF_X * x + COEF_Y * y` everywhere
    /// and zero the output.
    pub fn initialize(&mut self, chunk_size: usize) {
        profiling::scope!("grid_buffers::initialize");
        let coef_x = F::from_real(COEF_X);
        let coef_y = F::from_real(COEF_Y);
        self.input.par_set_values(
            |c: Coord<2>| {
                coef_x * F::from_count(c[0] as usize)
                    + coef_y * F::from_count(c[1] as usize)
            },
            chunk_size,
        );
        let n = self.size();
        par_slice::set_value(self.output.buffer_mut(), F::zero(), chunk_size * n);
    }

    /// Add `value` to every input cell, halo included.
    pub fn refresh_input(&mut self, value: F, chunk_size: usize) {
        profiling::scope!("grid_buffers::refresh_input");
        let n = self.size();
        par_slice::add_value(self.input.buffer_mut(), value, chunk_size * n);
    }
}
