use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use u_swarmbench::benchmark::StandardSuite;
use u_swarmbench::harness::{
    hardware_parallelism, prompt_pool_width, BatchConfig, ExecutionPolicy, Harness,
};
use u_swarmbench::optimizer::{Algorithm, RunConfig};
use u_swarmbench::population::Bounds;
use u_swarmbench::report::{log_summary, Reporter};
use u_swarmbench::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "swarmbench",
    about = "Benchmark SSA, MFO and GEA on the standard function suite"
)]
struct Cli {
    /// Benchmarks to run, by index or name (defaults to the whole suite)
    #[arg(long, value_delimiter = ',')]
    benchmarks: Vec<String>,

    /// Algorithms to run (defaults to SSA,MFO,GEA)
    #[arg(long, value_delimiter = ',')]
    algorithms: Vec<Algorithm>,

    /// Lower bound of every dimension
    #[arg(long, default_value_t = -100.0, allow_hyphen_values = true)]
    lb: f64,

    /// Upper bound of every dimension
    #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
    ub: f64,

    /// Dimensionality of the problem
    #[arg(long, default_value_t = 30)]
    dim: usize,

    /// Population size; a comma-separated list sweeps over every value
    #[arg(long, value_delimiter = ',', default_value = "50")]
    population: Vec<usize>,

    /// Iteration budget per run; a comma-separated list sweeps over every value
    #[arg(long, value_delimiter = ',', default_value = "1000")]
    max_iteration: Vec<usize>,

    /// Root seed for reproducible batches
    #[arg(long)]
    seed: Option<u64>,

    /// Number of worker threads (defaults to all available cores)
    #[arg(long, conflicts_with_all = ["interactive", "sequential"])]
    cores: Option<usize>,

    /// Ask for the number of worker threads on stdin
    #[arg(long, conflicts_with = "sequential")]
    interactive: bool,

    /// Run every task on the main thread
    #[arg(long)]
    sequential: bool,

    /// Independent runs per (algorithm, benchmark) pair
    #[arg(long, default_value_t = 1)]
    repetitions: usize,

    /// Directory receiving the CSV files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Append this run to the scalability table
    #[arg(long)]
    scalability: bool,

    /// Also write the convergence traces
    #[arg(long)]
    convergence: bool,

    /// Also write best / mean / std of the repetitions per task
    #[arg(long)]
    robustness: bool,

    /// List the available benchmark functions and exit
    #[arg(long)]
    list_functions: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_thread_ids(true)
        .init();
}

fn resolve_benchmark(token: &str) -> Result<usize> {
    let token = token.trim();
    if let Ok(index) = token.parse::<usize>() {
        return Ok(index);
    }
    StandardSuite::index_of(token)
        .ok_or_else(|| Error::InvalidConfig(format!("unknown benchmark '{token}'")))
}

fn build_config(cli: &Cli) -> Result<BatchConfig> {
    let bounds = Bounds::uniform(cli.lb, cli.ub, cli.dim)?;
    let run = RunConfig::new(bounds)
        .with_population_size(cli.population.first().copied().unwrap_or(50))
        .with_max_iteration(cli.max_iteration.first().copied().unwrap_or(1000));

    let policy = if cli.sequential {
        ExecutionPolicy::sequential()
    } else if cli.interactive {
        let stdin = io::stdin();
        let width = prompt_pool_width(stdin.lock(), &mut io::stdout(), hardware_parallelism())?;
        ExecutionPolicy::parallel(width)
    } else if let Some(cores) = cli.cores {
        ExecutionPolicy::parallel(cores)
    } else {
        ExecutionPolicy::available()
    };

    let mut config = BatchConfig::default()
        .with_run(run)
        .with_population_sizes(cli.population.clone())
        .with_max_iterations(cli.max_iteration.clone())
        .with_repetitions(cli.repetitions)
        .with_policy(policy);
    if !cli.benchmarks.is_empty() {
        let indices = cli
            .benchmarks
            .iter()
            .map(|b| resolve_benchmark(b))
            .collect::<Result<Vec<_>>>()?;
        config = config.with_benchmarks(indices);
    }
    if !cli.algorithms.is_empty() {
        config = config.with_algorithms(cli.algorithms.clone());
    }
    if let Some(seed) = cli.seed {
        config = config.with_root_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let results = Harness::run(&StandardSuite, &config)?;
    log_summary(&results);
    tracing::info!("root seed: {}", results.root_seed);

    let paths = Reporter::new(&cli.output_dir)
        .with_scalability(cli.scalability)
        .with_convergence(cli.convergence)
        .with_robustness(cli.robustness)
        .persist(&results)?;
    println!("Results have been written to {}", paths.report.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_functions {
        for index in StandardSuite::indices() {
            if let Some(name) = StandardSuite::name_of(index) {
                println!("{index:>2}  {name}");
            }
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
