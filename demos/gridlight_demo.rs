//! Terminal demo: infer a grid over a random road landscape.
//!
//! Run: cargo run --bin gridlight-demo -- --rows 30 --cols 80 --targets 15

use std::process::ExitCode;

use clap::Parser;
use gridlight_core::{Cell, Dims};
use gridlight_demos::{
    LandscapeConfig, ROAD_COST, generate_landscape, render, sample_targets, summary,
};
use gridlight_eval::{EvalOptions, eval_confusion_matrix, threshold_distances};
use gridlight_paths::{GridGraph, SpanningOptions, SpanningRun, distance_map, estimate_memory};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "gridlight-demo", about = "Connect random settlements over a synthetic road map")]
struct Cli {
    /// Map height in cells.
    #[arg(long, default_value_t = 24)]
    rows: usize,
    /// Map width in cells.
    #[arg(long, default_value_t = 72)]
    cols: usize,
    /// Number of settlements to connect.
    #[arg(long, default_value_t = 12)]
    targets: usize,
    /// Seed for the landscape and settlements.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop once this share of settlements is connected.
    #[arg(long, default_value_t = 1.0)]
    stop_fraction: f64,
    /// Distance from the network, in cost units, still counted as "grid"
    /// when scoring against the roads.
    #[arg(long, default_value_t = 0.0)]
    buffer: f64,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dims = Dims::new(cli.rows, cli.cols);
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let grid = generate_landscape(&LandscapeConfig::for_dims(dims), &mut rng)?;
    let targets = sample_targets(&grid, cli.targets, &mut rng);
    log::info!(
        "{} landscape, {} settlements, ~{} KiB of search state",
        dims,
        targets.len(),
        estimate_memory(dims) / 1024
    );

    let graph = GridGraph::new(&grid);
    let options = SpanningOptions::default().with_stop_fraction(cli.stop_fraction);
    let mut search = SpanningRun::new(&graph, &targets, options)?;
    search.run();
    let report = search.finish();

    print!("{}", render(&grid, &targets, &report));
    println!();
    print!("{}", summary(&report));

    // Score the network, widened by --buffer, against the road layer.
    let sources: Vec<Cell> = report.network().cells().into_iter().collect();
    if !sources.is_empty() {
        let guess = threshold_distances(&distance_map(&graph, &sources, cli.buffer), cli.buffer);
        let roads = grid.costs().map(|_, &v| v == ROAD_COST);
        let mat = eval_confusion_matrix(&roads, &guess, &EvalOptions::default())?;
        let share = |v: Option<f64>| v.map_or("n/a".to_string(), |x| format!("{:.1}%", x * 100.0));
        println!("on roads    : {} ({mat})", share(mat.precision()));
        println!("roads used  : {}", share(mat.recall()));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
