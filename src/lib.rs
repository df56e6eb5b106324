//! Sensor Route Planner Library
//!
//! A closed-tour route planner for a mobile collection agent visiting fixed
//! sensor sites (single-vehicle Euclidean TSP).
//!
//! # Features
//!
//! - Greedy nearest-neighbor construction (fast deterministic baseline)
//! - Genetic algorithm over the permutation space (fitness-proportional
//!   selection, elitism, order crossover, swap mutation)
//! - Comparison driver reporting improvement over a random baseline
//! - Field generation, JSON persistence, and SVG visualization
//!
//! # Example
//!
//! ```
//! use sensor_route_planner::field::SensorField;
//! use sensor_route_planner::heuristics::genetic::{GaConfig, GeneticAlgorithm};
//! use sensor_route_planner::heuristics::greedy::NearestNeighbor;
//! use sensor_route_planner::heuristics::RouteOptimizer;
//!
//! let field = SensorField::generate("demo", 20, 42);
//!
//! let greedy = NearestNeighbor::new().optimize(&field).unwrap();
//!
//! let config = GaConfig {
//!     population_size: 50,
//!     generations: 100,
//!     mutation_rate: 0.02,
//!     seed: 42,
//! };
//! let evolved = GeneticAlgorithm::new(config).run(&field).unwrap();
//!
//! println!("greedy: {:.2}, GA: {:.2}", greedy.length, evolved.length);
//! ```

pub mod benchmark;
pub mod error;
pub mod field;
pub mod heuristics;
pub mod route;
pub mod visualization;

pub use error::PlannerError;
pub use field::{Coordinate, SensorField};
pub use route::Route;
