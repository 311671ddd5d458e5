use super::*;
use crate::domain::*;
use crate::error::*;
use crate::par_stencil::{self, Traversal};
use crate::pool::WorkerPool;
use crate::stencil::*;
use crate::util::*;
use std::time::Instant;
use tracing::{debug, trace};

/// Constant added to every input cell after each round.
/// Forces workers to read fresh neighbor values every round.
pub const REFRESH_VALUE: f64 = 1.0;

/// Rows given to one task for setup and refresh phases.
const CHUNK_ROWS: usize = 1;

/// Outcome of a validated run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport<F: StencilFloat> {
    /// Computed L1 norm of the output interior.
    pub norm: F,

    /// Analytic value the norm is checked against.
    pub reference_norm: F,

    pub timing: TimingStats,

    /// Floating point operations for one round.
    pub flops: f64,
}

impl<F: StencilFloat> RunReport<F> {
    /// Rate of the fastest timed round.
    pub fn mflops(&self) -> f64 {
        1.0e-6 * self.flops / self.timing.min()
    }
}

impl<F: StencilFloat> std::fmt::Display for RunReport<F> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "Rate (MFlops/s): {:.6},  Avg time (s): {:.6},  Min time (s): {:.6}, Max time (s): {:.6}",
            self.mflops(),
            self.timing.average(),
            self.timing.min(),
            self.timing.max()
        )
    }
}

/// Applies the stencil `iterations` times and validates the result.
///
/// All grid work happens inside the worker pool. Every parallel phase
/// (seed, apply, refresh, norm) completes before the next one starts,
/// and only the driver thread touches the timing state between phases.
pub struct IterationDriver<F: StencilFloat> {
    params: RunParameters,
    weights: WeightMatrix<F>,
    traversal: Traversal,
    timing: TimingStats,
}

impl<F: StencilFloat> IterationDriver<F> {
    /// Validates the parameters and builds the weights.
    /// Nothing is allocated yet.
    pub fn new(params: RunParameters) -> Result<Self> {
        params.validate::<F>()?;
        let weights =
            WeightMatrix::for_grid(params.radius, params.shape, params.grid_size)?;
        let traversal = params.traversal();
        debug!(
            ?params,
            ?traversal,
            precision = F::PRECISION_NAME,
            "stencil run configured"
        );
        Ok(IterationDriver {
            timing: TimingStats::new(params.iterations),
            params,
            weights,
            traversal,
        })
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn timing(&self) -> &TimingStats {
        &self.timing
    }

    /// Floating point operations for one round over the interior.
    pub fn flops(&self) -> f64 {
        self.weights.flops_per_point() as f64 * self.params.active_points() as f64
    }

    /// Check the pool, allocate the grids, run every round and validate.
    /// Timing starts over on every call.
    pub fn run(&mut self, pool: &WorkerPool) -> Result<RunReport<F>> {
        pool.check_workers()?;
        self.timing = TimingStats::new(self.params.iterations);
        let mut buffers = GridBuffers::<F>::try_new(self.params.grid_size)?;
        let norm = pool.install(|| self.execute(&mut buffers));
        drop(buffers);

        let reference = reference_norm::<F>(self.params.iterations);
        debug!(%norm, %reference, "L1 norm computed");
        check_norm(norm, reference)?;
        Ok(RunReport {
            norm,
            reference_norm: reference,
            timing: self.timing,
            flops: self.flops(),
        })
    }

    /// Rounds on already allocated buffers, returns the L1 norm.
    fn execute(&mut self, buffers: &mut GridBuffers<F>) -> F {
        buffers.initialize(CHUNK_ROWS);
        let refresh = F::from_real(REFRESH_VALUE);

        for round in 0..self.params.iterations {
            let start = Instant::now();
            par_stencil::apply(
                &self.weights,
                &buffers.input,
                &mut buffers.output,
                self.traversal,
            );
            let elapsed = start.elapsed().as_secs_f64();
            let kept = self.timing.record(round, elapsed);
            trace!(round, elapsed, kept, "stencil round");

            buffers.refresh_input(refresh, CHUNK_ROWS);
            profiling::finish_frame!();
        }

        l1_norm(&buffers.output, self.params.radius)
    }
}

/// Build a pool with `params.threads` workers and run.
pub fn run_stencil<F: StencilFloat>(params: RunParameters) -> Result<RunReport<F>> {
    let mut driver = IterationDriver::<F>::new(params)?;
    let pool = WorkerPool::new(driver.params().threads)?;
    driver.run(&pool)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn params(
        threads: usize,
        iterations: usize,
        grid_size: usize,
        tile_size: usize,
        radius: usize,
        shape: StencilShape,
    ) -> RunParameters {
        RunParameters {
            threads,
            iterations,
            grid_size,
            tile_size,
            radius,
            shape,
        }
    }

    #[test]
    fn star_single_round() {
        let report =
            run_stencil::<f64>(params(1, 1, 10, 10, 2, StencilShape::Star))
                .unwrap();
        assert_approx_eq!(f64, report.norm, 2.0, epsilon = 1e-8);
        assert_approx_eq!(f64, report.reference_norm, 2.0);
        assert_eq!(report.timing.samples(), 1);
        assert_approx_eq!(f64, report.flops, 17.0 * 36.0);
    }

    #[test]
    fn compact_many_rounds_tiled() {
        let report =
            run_stencil::<f64>(params(3, 5, 40, 7, 3, StencilShape::Compact))
                .unwrap();
        assert_approx_eq!(f64, report.norm, 10.0, epsilon = 1e-8);
        assert_eq!(report.timing.samples(), 4);
        assert!(report.timing.min() <= report.timing.max());
    }

    #[test]
    fn single_precision() {
        let report =
            run_stencil::<f32>(params(2, 4, 32, 5, 2, StencilShape::Star))
                .unwrap();
        assert_approx_eq!(f32, report.norm, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn configuration_errors() {
        assert_eq!(
            IterationDriver::<f64>::new(params(1, 1, 4, 4, 2, StencilShape::Star))
                .err(),
            Some(StencilError::RadiusExceedsGrid {
                radius: 2,
                grid_size: 4
            })
        );
        assert_eq!(
            IterationDriver::<f64>::new(params(1, 0, 10, 10, 2, StencilShape::Star))
                .err(),
            Some(StencilError::InvalidIterations(0))
        );
    }

    #[test]
    fn repeated_runs_restart_timing() {
        let mut driver =
            IterationDriver::<f64>::new(params(2, 3, 12, 12, 2, StencilShape::Star))
                .unwrap();
        let pool = WorkerPool::new(2).unwrap();
        for _ in 0..2 {
            let report = driver.run(&pool).unwrap();
            assert_eq!(report.timing.samples(), 2);
            assert_eq!(driver.timing().samples(), 2);
            assert_approx_eq!(f64, report.norm, 6.0, epsilon = 1e-8);
            assert!(report.timing.min() <= report.timing.max());
        }
    }

    #[test]
    fn worker_mismatch_aborts() {
        let mut driver =
            IterationDriver::<f64>::new(params(4, 1, 10, 10, 2, StencilShape::Star))
                .unwrap();
        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap();
        let pool = WorkerPool::from_pool(4, inner);
        assert_eq!(
            driver.run(&pool),
            Err(StencilError::WorkerCountMismatch {
                requested: 4,
                actual: 2
            })
        );
        assert_eq!(driver.timing().samples(), 0);
    }

    #[test]
    fn report_display() {
        let mut timing = TimingStats::new(1);
        timing.record(0, 0.5);
        let report = RunReport {
            norm: 2.0f64,
            reference_norm: 2.0,
            timing,
            flops: 1.0e6,
        };
        assert_approx_eq!(f64, report.mflops(), 2.0);
        assert_eq!(
            report.to_string(),
            "Rate (MFlops/s): 2.000000,  Avg time (s): 0.500000,  Min time (s): 0.500000, Max time (s): 0.500000"
        );
    }
}
