use clap::Parser;
use skyroute::{
    cache::{CacheConfig, WeightMode},
    graph::{FrontierOrder, MultiGraph},
    planner::{FlightOutcome, FlightPlanner, PlannerError},
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flight route planner over a two-weight multigraph
#[derive(Parser, Debug)]
#[command(name = "skyroute")]
#[command(about = "Finds flight routes blending price and duration", long_about = None)]
struct Args {
    /// Path to the flight map
    #[arg(short, long)]
    map: PathBuf,

    /// Path to a JSON cache configuration (capacity and hash primes)
    #[arg(short, long)]
    cache_config: Option<PathBuf>,

    /// Departure airport
    #[arg(short, long)]
    from: String,

    /// Arrival airport
    #[arg(short, long)]
    to: String,

    /// Blend factors to sweep (comma-separated list, e.g., "0,0.5,1")
    #[arg(short, long, value_delimiter = ',', default_value = "0,1")]
    alpha: Vec<f32>,

    /// Airlines to avoid (comma-separated list, e.g., "THY,PGS")
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// How many times the sweep is repeated
    #[arg(long, default_value_t = 2)]
    rounds: usize,

    /// Also report the furthest transfer from the departure airport via this airline
    #[arg(long)]
    airline: Option<String>,

    /// Expand vertices by tentative distance instead of by vertex index
    #[arg(long)]
    distance_frontier: bool,

    #[arg(long)]
    print_map: bool,

    #[arg(long)]
    print_cache: bool,
}

fn mode_label(mode: WeightMode) -> &'static str {
    match mode {
        WeightMode::Primary => "price",
        WeightMode::Secondary => "duration",
    }
}

fn report(planner: &FlightPlanner, from: &str, to: &str, alpha: f32, outcome: &FlightOutcome) {
    match outcome {
        FlightOutcome::Cached { mode, .. } => println!(
            "A flight path between \"{from}\" and \"{to}\" using {} is found in cache.",
            mode_label(*mode)
        ),
        FlightOutcome::Calculated { mode, .. } => println!(
            "A flight path is calculated between \"{from}\" and \"{to}\" using {}.",
            mode_label(*mode)
        ),
        FlightOutcome::Computed { .. } => {}
        FlightOutcome::NoPath => {
            println!("A flight path does not exist between \"{from}\" and \"{to}\".");
            return;
        }
    }

    if let Some(rendered) = outcome
        .path()
        .and_then(|path| planner.map().display_path(path, alpha))
    {
        println!("{rendered}");
    }
}

fn main() -> Result<(), PlannerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = match &args.cache_config {
        Some(path) => CacheConfig::load_from_path(path)?,
        None => CacheConfig::default(),
    };
    let frontier = if args.distance_frontier {
        FrontierOrder::Distance
    } else {
        FrontierOrder::VertexIndex
    };

    println!("Loading flight map...");
    let map = MultiGraph::load_from_path(&args.map)?.with_frontier_order(frontier);
    println!(
        "Flight map loaded with {} airports and {} flights",
        map.len(),
        map.edge_count()
    );
    let mut planner = FlightPlanner::new(map, config);

    if args.print_map {
        print!("{}", planner.render_map());
    }

    println!("\nStarting sweep:");
    println!("  Route: {} -> {}", args.from, args.to);
    println!("  Alphas: {:?}", args.alpha);
    println!("  Rounds: {}", args.rounds);

    for round in 0..args.rounds {
        println!("\n==========");
        println!("Round {}", round + 1);
        println!("==========");

        for &alpha in &args.alpha {
            let outcome = if args.exclude.is_empty() {
                planner.find_flight(&args.from, &args.to, alpha)?
            } else {
                let excluded = args.exclude.as_slice();
                planner.find_specific_flight(&args.from, &args.to, alpha, excluded)?
            };
            report(&planner, &args.from, &args.to, alpha, &outcome);
        }
    }

    if let Some(airline) = &args.airline {
        match planner.furthest_transfer(&args.from, airline)? {
            Some(depth) => println!("\nFurthest transfer from {} via {airline}: {depth}", args.from),
            None => println!("\n{airline} does not fly out of {}", args.from),
        }
    }
    println!("Round trip routes: {}", planner.round_trip_routes());

    if args.print_cache {
        print!("\n{}", planner.render_cache(true));
    }

    println!("\n{}", planner.stats());
    Ok(())
}
