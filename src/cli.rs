use crate::build_info;
use crate::error::*;
use crate::par_stencil::Traversal;
use crate::solver::*;
use crate::util::*;
use clap::Parser;

/// Parallel 2D stencil kernel benchmark
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
pub struct Args {
    /// Number of worker threads.
    #[arg(required_unless_present = "build_info")]
    pub threads: Option<i64>,

    /// Number of stencil applications.
    #[arg(required_unless_present = "build_info")]
    pub iterations: Option<i64>,

    /// Linear grid dimension, the grid is square.
    #[arg(required_unless_present = "build_info")]
    pub grid_size: Option<i64>,

    /// Tile edge, defaults to the grid dimension (no tiling).
    pub tile_size: Option<i64>,

    /// Print norms and enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

/// Outcome of command line handling.
#[derive(Debug)]
pub enum CliAction {
    /// Run the kernel with these arguments.
    Run(Args),

    /// Output was already printed, exit successfully.
    Exit,
}

impl Args {
    /// Parse the command line.
    /// `--help` and `--version` print and return `Exit`,
    /// every other parse failure becomes `InvalidArguments`.
    pub fn try_cli<I, T>(itr: I) -> Result<CliAction>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Args::try_parse_from(itr) {
            Ok(args) => Ok(CliAction::Run(args)),
            Err(e) if !e.use_stderr() => {
                let _ = e.print();
                Ok(CliAction::Exit)
            }
            Err(e) => Err(StencilError::InvalidArguments(e.to_string())),
        }
    }

    /// Parse `itr`, print the build report for `--build-info`.
    pub fn cli_setup_from<I, T>(name: &str, itr: I) -> Result<CliAction>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Args::try_cli(itr)? {
            CliAction::Run(args) if args.build_info => {
                build_info::print_report(name);
                Ok(CliAction::Exit)
            }
            action => Ok(action),
        }
    }

    pub fn cli_setup(name: &str) -> Result<CliAction> {
        Args::cli_setup_from(name, std::env::args_os())
    }

    /// Convert the signed command line values.
    /// Range checks that depend on the stencil happen in
    /// `RunParameters::validate`.
    pub fn run_parameters(&self) -> Result<RunParameters> {
        let threads = positional(self.threads, "threads")?;
        let threads = usize::try_from(threads)
            .map_err(|_| StencilError::InvalidThreads(threads))?;
        let iterations = positional(self.iterations, "iterations")?;
        let iterations = usize::try_from(iterations)
            .map_err(|_| StencilError::InvalidIterations(iterations))?;
        let grid_size = positional(self.grid_size, "grid dimension")?;
        let grid_size = usize::try_from(grid_size)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(StencilError::InvalidGridSize(grid_size))?;
        let tile_size = match self.tile_size {
            Some(t) => usize::try_from(t)
                .map_err(|_| StencilError::InvalidTileSize(t))?,
            None => grid_size,
        };
        Ok(RunParameters {
            threads,
            iterations,
            grid_size,
            tile_size,
            ..Default::default()
        })
    }
}

fn positional(value: Option<i64>, name: &str) -> Result<i64> {
    value.ok_or_else(|| StencilError::InvalidArguments(format!("missing {name}")))
}

/// Header lines describing a validated run.
pub fn header_lines<F: StencilFloat>(params: &RunParameters) -> Vec<String> {
    let mut lines = vec![
        "Parallel stencil execution on 2D grid".to_string(),
        format!("Number of threads    = {}", params.threads),
        format!("Grid size            = {}", params.grid_size),
        format!("Radius of stencil    = {}", params.radius),
    ];
    match params.traversal() {
        Traversal::Tiled(edge) => {
            lines.push(format!("Tile size            = {}", edge))
        }
        Traversal::Direct => lines.push("Grid not tiled".to_string()),
    }
    lines.push(format!("Type of stencil      = {}", params.shape));
    lines.push(format!("Data type            = {}", F::PRECISION_NAME));
    lines.push(format!("Number of iterations = {}", params.iterations));
    lines
}

/// Keeps the puffin server alive until dropped.
pub struct ProfilingSession {
    #[cfg(feature = "profile-with-puffin")]
    _server: Option<puffin_http::Server>,
}

impl ProfilingSession {
    #[cfg(feature = "profile-with-puffin")]
    pub fn start() -> Self {
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        let server = match puffin_http::Server::new(&server_addr) {
            Ok(server) => {
                tracing::info!(
                    "Run this to view profiling data:  puffin_viewer {server_addr}"
                );
                profiling::puffin::set_scopes_on(true);
                Some(server)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start profiling server");
                None
            }
        };
        ProfilingSession { _server: server }
    }

    #[cfg(not(feature = "profile-with-puffin"))]
    pub fn start() -> Self {
        ProfilingSession {}
    }
}
