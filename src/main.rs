//! Sensor Route Planner - Command Line Interface
//!
//! Plans closed collection tours over fixed sensor sites.

use clap::{Parser, Subcommand, ValueEnum};
use sensor_route_planner::benchmark::Comparison;
use sensor_route_planner::field::SensorField;
use sensor_route_planner::heuristics::genetic::{GaConfig, GeneticAlgorithm};
use sensor_route_planner::heuristics::greedy::NearestNeighbor;
use sensor_route_planner::heuristics::RouteOptimizer;
use sensor_route_planner::route::Route;
use sensor_route_planner::visualization::Visualizer;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sensor-route-planner")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "A closed-tour route planner for sensor collection runs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random sensor field and save it as JSON
    Generate {
        /// Number of sensor sites
        #[arg(short, long, default_value = "20")]
        sensors: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output field file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Plan a route over a field with one optimizer
    Solve {
        /// Path to the field file
        #[arg(short, long)]
        field: PathBuf,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "ga")]
        algorithm: Algorithm,

        /// GA population size
        #[arg(long, default_value = "100")]
        population_size: usize,

        /// GA generation count
        #[arg(long, default_value = "500")]
        generations: usize,

        /// GA swap-mutation probability
        #[arg(long, default_value = "0.02")]
        mutation_rate: f64,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output route to file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate SVG visualization next to the field file
        #[arg(long)]
        visualize: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare random baseline, greedy, and GA on a field
    Compare {
        /// Path to the field file
        #[arg(short, long)]
        field: PathBuf,

        /// GA population size
        #[arg(long, default_value = "100")]
        population_size: usize,

        /// GA generation count
        #[arg(long, default_value = "500")]
        generations: usize,

        /// GA swap-mutation probability
        #[arg(long, default_value = "0.02")]
        mutation_rate: f64,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Random shuffle baseline
    Random,
    /// Nearest-neighbor construction
    Nn,
    /// Genetic algorithm
    Ga,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            sensors,
            seed,
            output,
        } => {
            generate_field(sensors, seed, &output);
        }

        Commands::Solve {
            field,
            algorithm,
            population_size,
            generations,
            mutation_rate,
            seed,
            output,
            visualize,
            verbose,
        } => {
            let config = GaConfig {
                population_size,
                generations,
                mutation_rate,
                seed,
            };
            solve_field(&field, algorithm, config, output, visualize, verbose);
        }

        Commands::Compare {
            field,
            population_size,
            generations,
            mutation_rate,
            seed,
            output,
        } => {
            let config = GaConfig {
                population_size,
                generations,
                mutation_rate,
                seed,
            };
            compare_optimizers(&field, config, output);
        }
    }
}

fn generate_field(sensors: usize, seed: u64, output: &PathBuf) {
    let name = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "field".to_string());

    let field = SensorField::generate(&name, sensors, seed);

    if let Err(e) = field.save(output) {
        eprintln!("Error saving field: {}", e);
        std::process::exit(1);
    }

    println!("Generated field with {} sensors -> {:?}", sensors, output);
}

fn solve_field(
    path: &PathBuf,
    algorithm: Algorithm,
    config: GaConfig,
    output: Option<PathBuf>,
    visualize: bool,
    verbose: bool,
) {
    println!("Loading field from {:?}...", path);

    let field = match SensorField::from_file(path) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error loading field: {}", e);
            std::process::exit(1);
        }
    };

    if verbose {
        println!("{}", field.statistics());
    }

    println!("Solving with {:?} algorithm...", algorithm);

    let result = match algorithm {
        Algorithm::Random => Ok(Route::random(&field, config.seed)),
        Algorithm::Nn => NearestNeighbor::new().optimize(&field),
        Algorithm::Ga => GeneticAlgorithm::new(config).run(&field),
    };

    let route = match result {
        Ok(route) => route,
        Err(e) => {
            eprintln!("Optimizer error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n========== Results ==========");
    println!("Algorithm: {}", route.algorithm);
    println!("Tour length: {:.2}", route.length);
    println!("Time: {:.4}s", route.computation_time);
    if let Some(iter) = route.iterations {
        println!("Generations: {}", iter);
    }

    if verbose {
        println!("\nTour: {:?}", route.tour);
    }

    if let Some(out_path) = output {
        match serde_json::to_string_pretty(&route) {
            Ok(json) => match std::fs::write(&out_path, json) {
                Ok(()) => println!("\nRoute saved to {:?}", out_path),
                Err(e) => eprintln!("Failed to write route: {}", e),
            },
            Err(e) => eprintln!("Failed to serialize route: {}", e),
        }
    }

    if visualize {
        let viz = Visualizer::new();
        match viz.generate_svg(&field, &route) {
            Ok(svg) => {
                let svg_path = path.with_extension("svg");
                match viz.save_svg(&svg, &svg_path) {
                    Ok(()) => println!("Visualization saved to {:?}", svg_path),
                    Err(e) => eprintln!("Failed to save SVG: {}", e),
                }
            }
            Err(e) => eprintln!("Failed to render SVG: {}", e),
        }
    }
}

fn compare_optimizers(path: &PathBuf, config: GaConfig, output: Option<PathBuf>) {
    let field = match SensorField::from_file(path) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error loading field: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Comparing optimizers on {} ({} sensors)...\n",
        field.name,
        field.dimension()
    );

    let mut comparison = Comparison::new(config);
    let run = match comparison.run(&field) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Comparison error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", run.baseline);
    println!("{}", run.greedy);
    println!("{}", run.genetic);

    println!("{}", comparison.generate_report());

    if let Some(out_path) = output {
        match comparison.export_to_csv(&out_path) {
            Ok(()) => println!("Results exported to {:?}", out_path),
            Err(e) => eprintln!("Failed to export CSV: {}", e),
        }
    }
}
