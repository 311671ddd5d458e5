use crate::error::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;
use tracing::{debug, warn};

/// Fixed size set of worker threads used for every parallel phase of a run.
/// Created once, before any grid is touched.
pub struct WorkerPool {
    requested: usize,
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Request `threads` workers.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("stencil_worker_{}", i))
            .build()
            .map_err(|e| StencilError::PoolBuild(e.to_string()))?;
        Ok(Self::from_pool(threads, pool))
    }

    /// Wrap an existing pool that was asked for `requested` workers.
    pub fn from_pool(requested: usize, pool: rayon::ThreadPool) -> Self {
        WorkerPool { requested, pool }
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Number of workers the pool actually runs.
    pub fn actual(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Handshake with every worker.
    /// Each worker registers itself, then worker 0 compares the count with
    /// the request and raises a shared abort flag on mismatch.
    /// All workers observe the flag before leaving.
    ///
    /// Must not be called from inside `install`.
    pub fn check_workers(&self) -> Result<usize> {
        let started = self.actual();
        let registered = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let barrier = Barrier::new(started);

        let observed: Vec<bool> = self.pool.broadcast(|ctx| {
            registered.fetch_add(1, Ordering::SeqCst);
            barrier.wait();
            if ctx.index() == 0
                && registered.load(Ordering::SeqCst) != self.requested
            {
                abort.store(true, Ordering::SeqCst);
            }
            barrier.wait();
            abort.load(Ordering::SeqCst)
        });
        debug_assert!(observed.iter().all(|a| *a == observed[0]));

        let actual = registered.into_inner();
        if abort.into_inner() {
            warn!(
                requested = self.requested,
                actual, "worker count mismatch, aborting"
            );
            return Err(StencilError::WorkerCountMismatch {
                requested: self.requested,
                actual,
            });
        }
        debug!(workers = actual, "worker pool started");
        Ok(actual)
    }

    /// Run `op` inside the pool. Parallel iterators in `op` use its workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
