use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eulertour::topology::parse::{parse_edge_list, parse_operations, parse_values};
use eulertour::{EulerTour, Operation, Topology, TourConfig, TourContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eulertour", about = "Subtree-sum queries via Euler tour flattening")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the [entry, exit] interval of every node.
    Tour {
        /// Edge list (`N` on the first line, then `u v` per edge).
        edges: PathBuf,
        /// Root node.
        #[arg(long, default_value_t = 1)]
        root: usize,
        /// Print a traversal profile after the mapping.
        #[arg(long)]
        profile: bool,
    },
    /// Build, load values, and run an operation script.
    Run {
        /// Edge list (`N` on the first line, then `u v` per edge).
        edges: PathBuf,
        /// Initial values for nodes 1..=N.
        values: PathBuf,
        /// Operation script (`update <node> <value>` / `query <node>`).
        /// Without it, every node's subtree sum is printed.
        ops: Option<PathBuf>,
        /// Root node.
        #[arg(long, default_value_t = 1)]
        root: usize,
    },
    /// Replay the built-in five-node example.
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tour {
            edges,
            root,
            profile,
        } => run_tour(&edges, root, profile)?,
        Commands::Run {
            edges,
            values,
            ops,
            root,
        } => run_script(&edges, &values, ops.as_deref(), root)?,
        Commands::Demo => run_demo()?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_topology(path: &Path) -> Result<Topology> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read edge list {}", path.display()))?;
    parse_edge_list(&text).with_context(|| format!("invalid edge list {}", path.display()))
}

fn run_tour(edges_path: &Path, root: usize, profile: bool) -> Result<()> {
    let topology = read_topology(edges_path)?;
    let config = TourConfig {
        profile_traversal: profile,
        ..TourConfig::rooted_at(root)
    };
    let tour = EulerTour::flatten_with_config(&topology, &config).context("failed to flatten tree")?;

    println!("Node Mapping (Time In | Time Out):");
    print!("{}", tour.render());
    if let Some(profile) = tour.profile() {
        println!();
        println!("{}", profile.report());
    }
    Ok(())
}

fn run_script(
    edges_path: &Path,
    values_path: &Path,
    ops_path: Option<&Path>,
    root: usize,
) -> Result<()> {
    let topology = read_topology(edges_path)?;
    let node_count = topology.node_count();

    let values_text = fs::read_to_string(values_path)
        .with_context(|| format!("failed to read values {}", values_path.display()))?;
    let values = parse_values(&values_text, node_count)
        .with_context(|| format!("invalid values file {}", values_path.display()))?;

    let mut ctx = TourContext::build(topology, root).context("failed to build tour")?;
    ctx.initialize(&values).context("failed to initialize values")?;
    info!(nodes = node_count, root, "context ready");

    let Some(ops_path) = ops_path else {
        for node in 1..=node_count {
            println!("{}\t{}", node, ctx.query_subtree(node)?);
        }
        return Ok(());
    };

    let ops_text = fs::read_to_string(ops_path)
        .with_context(|| format!("failed to read operations {}", ops_path.display()))?;
    let ops = parse_operations(&ops_text)
        .with_context(|| format!("invalid operations file {}", ops_path.display()))?;

    for (idx, op) in ops.into_iter().enumerate() {
        let result = ctx
            .apply(op)
            .with_context(|| format!("operation {} ({:?}) failed", idx + 1, op))?;
        if let (Operation::Query { node }, Some(sum)) = (op, result) {
            println!("query {}\t{}", node, sum);
        }
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    //       1
    //     /   \
    //    2     3
    //   / \
    //  4   5
    let topology = Topology::from_edges(5, &[(1, 2), (1, 3), (2, 4), (2, 5)])?;
    let mut ctx = TourContext::build(topology, 1)?;
    ctx.initialize(&[10, 20, 30, 40, 50])?;

    println!("--- Euler Tour Demo ---");
    println!("Node Mapping (Time In | Time Out):");
    print!("{}", ctx.tour().render());
    println!();

    println!("Querying subtree sum of node 2...");
    println!("Range: {}", ctx.interval(2)?);
    println!("Result: {} (expected: 110)", ctx.query_subtree(2)?);
    println!();

    println!("Updating node 4 value to 100...");
    ctx.update(4, 100)?;
    println!("Querying subtree sum of node 2 (after update)...");
    println!("Result: {} (expected: 170)", ctx.query_subtree(2)?);
    println!("Whole tree: {}", ctx.total()?);

    Ok(())
}
