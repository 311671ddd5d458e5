use stencil_kernel::cli::*;
use stencil_kernel::error::*;
use stencil_kernel::pool::WorkerPool;
use stencil_kernel::solver::*;
use stencil_kernel::util::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let params = args.run_parameters()?;
    let mut driver = IterationDriver::<Real>::new(params)?;
    for line in header_lines::<Real>(driver.params()) {
        println!("{}", line);
    }

    let pool = WorkerPool::new(driver.params().threads)?;
    let report = driver.run(&pool)?;

    println!("Solution validates");
    if args.verbose {
        println!(
            "Reference L1 norm = {}, L1 norm = {}",
            report.reference_norm, report.norm
        );
    }
    println!("{}", report);
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::cli_setup("stencil_kernel") {
        Ok(CliAction::Run(args)) => args,
        Ok(CliAction::Exit) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(args.verbose);
    let _profiling = ProfilingSession::start();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
