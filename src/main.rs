use clap::{Parser, Subcommand};
use sortnet_search::error::Result;
use sortnet_search::fitness::FitnessKind;
use sortnet_search::network::{Network, green_filter, optimal_size};
use sortnet_search::parser::parse_network;
use sortnet_search::search::{GreedySearch, LevelSearch, Prefix, SearchConfig};
use sortnet_search::sequence::initialize_cache;
use sortnet_search::subsumption::SubsumptionKind;
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "sortnet")]
#[command(about = "sortnet - minimum-size sorting network search")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parallel level-by-level search
    Search {
        /// Number of wires
        wires: usize,
        /// First comparator count to build
        #[arg(long, default_value = "1")]
        from: usize,
        /// Last comparator count to build (defaults to the known optimum)
        #[arg(long)]
        to: Option<usize>,
        /// Worker threads (0 = all cores)
        #[arg(long, short = 'j', default_value = "0")]
        threads: usize,
        /// Widest sequence table to prepare (defaults to the wire count)
        #[arg(long)]
        max_wires: Option<usize>,
        /// Subsumption implementation: SubsumptionMatchImpl or SubsumptionBipartiteMatching
        #[arg(long, default_value = "SubsumptionMatchImpl")]
        subsumption: SubsumptionKind,
        /// Fitness estimator used by the capacity rule
        #[arg(long, default_value = "bad-pos-count")]
        fitness: FitnessKind,
        /// Live networks kept per level
        #[arg(long, default_value = "8000")]
        capacity: usize,
        /// Only check dominance in the final pass of each level
        #[arg(long)]
        no_expansion_subsumption: bool,
        /// Dead entries tolerated before the frontier is compacted
        #[arg(long, default_value = "1000")]
        compaction_threshold: usize,
        /// Progress report interval in seconds (0 = off)
        #[arg(long, default_value = "0")]
        monitor: u64,
        /// Directory for generation files
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Starting network: none or green
        #[arg(long, default_value = "none")]
        prefix: Prefix,
    },
    /// Sequential greedy best-first search
    Greedy {
        /// Number of wires
        wires: usize,
        /// Last comparator count to build (defaults to the known optimum)
        #[arg(long)]
        to: Option<usize>,
        /// Networks kept per level
        #[arg(long, default_value = "100")]
        bound: usize,
        #[arg(long, default_value = "SubsumptionMatchImpl")]
        subsumption: SubsumptionKind,
        #[arg(long, default_value = "bad-pos-count")]
        fitness: FitnessKind,
        /// Starting network: none or green
        #[arg(long, default_value = "none")]
        prefix: Prefix,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Describe a network given as `[(0,1);(1,2);...]`
    Check {
        /// Number of wires
        wires: usize,
        /// Comparator list, 0- or 1-indexed
        network: String,
        #[arg(long, default_value = "bad-pos-count")]
        fitness: FitnessKind,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// --- Commands ---

#[allow(clippy::too_many_arguments)]
fn run_search(
    wires: usize,
    from: usize,
    to: Option<usize>,
    threads: usize,
    max_wires: Option<usize>,
    subsumption: SubsumptionKind,
    fitness: FitnessKind,
    capacity: usize,
    no_expansion_subsumption: bool,
    compaction_threshold: usize,
    monitor: u64,
    out_dir: Option<PathBuf>,
    seed: Option<u64>,
    prefix: Prefix,
    verbose: bool,
) -> Result<()> {
    let mut config = SearchConfig::new(wires)
        .with_threads(threads)
        .with_max_wires(max_wires.unwrap_or(wires))
        .with_subsumption(subsumption)
        .with_fitness(fitness)
        .with_capacity(capacity)
        .with_expansion_subsumption(!no_expansion_subsumption)
        .with_compaction_threshold(compaction_threshold)
        .with_monitor_interval(Duration::from_secs(monitor))
        .with_seed_option(seed)
        .with_prefix(prefix)
        .with_trace(verbose);
    config.from = from;
    config.to = to;
    if let Some(dir) = out_dir {
        config = config.with_out_dir(dir);
    }

    let search = LevelSearch::new(config)?;
    let result = search.run()?;

    println!("Levels: {}", result.levels.len());
    println!("Elapsed: {:.2?}", result.total_elapsed());
    if let Some(last) = result.levels.last() {
        println!("{}", last.statistics.format_summary());
    }
    match result.best_size() {
        Some(size) => {
            println!(
                "Sorting networks of size {} found: {}",
                size,
                result.sorting.len()
            );
            for net in result.sorting_networks() {
                println!("  {net}");
            }
        }
        None => println!("No sorting network found; {} networks left", result.networks.len()),
    }
    Ok(())
}

fn run_greedy(
    wires: usize,
    to: Option<usize>,
    bound: usize,
    subsumption: SubsumptionKind,
    fitness: FitnessKind,
    prefix: Prefix,
    seed: Option<u64>,
) -> Result<()> {
    initialize_cache(wires)?;
    let start = match prefix {
        Prefix::None => Network::new(wires)?,
        Prefix::GreenFilter => green_filter(wires)?,
    };
    let to = to.or_else(|| optimal_size(wires)).unwrap_or(start.size());
    let mut search = GreedySearch::new(subsumption, fitness, bound, seed);
    let last = search.generate(&start, to)?;

    let sorting: Vec<&Network> = last.iter().filter(|n| n.is_sorting()).collect();
    println!("Networks in last level: {}", last.len());
    println!("Sorting networks: {}", sorting.len());
    for net in sorting {
        println!("  {net}");
    }
    println!("{}", search.statistics().snapshot().format_summary());
    Ok(())
}

fn run_check(wires: usize, text: &str, fitness: FitnessKind) -> Result<()> {
    initialize_cache(wires)?;
    let net = parse_network(wires, text)?;
    let estimator = fitness.build();
    println!("Network: {net}");
    println!("Size: {}", net.size());
    println!("Depth: {}", net.depth());
    println!("Outputs: {}", net.output_size());
    println!("Sorting: {}", net.is_sorting());
    println!("Fitness ({}): {:.6}", estimator.name(), net.fitness(estimator.as_ref()));
    if let Some(opt) = optimal_size(wires) {
        println!("Best known size: {opt}");
    }
    println!("Layers:\n{}", net.layers_string());
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let outcome = match args.command {
        Commands::Search {
            wires,
            from,
            to,
            threads,
            max_wires,
            subsumption,
            fitness,
            capacity,
            no_expansion_subsumption,
            compaction_threshold,
            monitor,
            out_dir,
            seed,
            prefix,
        } => run_search(
            wires,
            from,
            to,
            threads,
            max_wires,
            subsumption,
            fitness,
            capacity,
            no_expansion_subsumption,
            compaction_threshold,
            monitor,
            out_dir,
            seed,
            prefix,
            args.verbose,
        ),
        Commands::Greedy {
            wires,
            to,
            bound,
            subsumption,
            fitness,
            prefix,
            seed,
        } => run_greedy(wires, to, bound, subsumption, fitness, prefix, seed),
        Commands::Check {
            wires,
            network,
            fitness,
        } => run_check(wires, &network, fitness),
    };

    if let Err(e) = outcome {
        error!("{e}");
        std::process::exit(1);
    }
}
