//! Optimization driver: compares optimizers on the same field.
//!
//! Runs a random-shuffle baseline, the greedy nearest-neighbor heuristic,
//! and the genetic algorithm against one sensor field, then reports tour
//! lengths and relative improvement percentages over the baseline.

use crate::error::PlannerError;
use crate::field::SensorField;
use crate::heuristics::genetic::{GaConfig, GeneticAlgorithm};
use crate::heuristics::greedy::NearestNeighbor;
use crate::heuristics::RouteOptimizer;
use crate::route::Route;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Result of running a single optimizer on a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerResult {
    /// Algorithm name
    pub algorithm: String,
    /// Field name
    pub field: String,
    /// Number of sensor sites
    pub dimension: usize,
    /// Closed-tour length
    pub length: f64,
    /// Computation time in seconds
    pub time: f64,
    /// Number of iterations (if applicable)
    pub iterations: Option<usize>,
    /// Relative improvement over the random baseline, in percent
    pub improvement_over_random: f64,
}

/// The three routes produced by one comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub baseline: Route,
    pub greedy: Route,
    pub genetic: Route,
}

/// Comparison engine
pub struct Comparison {
    config: GaConfig,
    results: Vec<OptimizerResult>,
}

impl Comparison {
    pub fn new(config: GaConfig) -> Self {
        Comparison {
            config,
            results: Vec::new(),
        }
    }

    /// Relative improvement of `candidate` over `baseline` in percent.
    /// A zero-length baseline (degenerate field) yields 0 rather than a
    /// division fault.
    fn improvement(baseline: f64, candidate: f64) -> f64 {
        if baseline > 0.0 {
            (baseline - candidate) / baseline * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, field: &SensorField, route: &Route, baseline_length: f64) {
        self.results.push(OptimizerResult {
            algorithm: route.algorithm.clone(),
            field: field.name.clone(),
            dimension: field.dimension(),
            length: route.length,
            time: route.computation_time,
            iterations: route.iterations,
            improvement_over_random: Self::improvement(baseline_length, route.length),
        });
    }

    /// Run all three optimizers against the field.
    ///
    /// The random baseline reuses the configured seed so a comparison run
    /// is reproducible end to end.
    pub fn run(&mut self, field: &SensorField) -> Result<ComparisonRun, PlannerError> {
        log::info!(
            "comparing optimizers on field '{}' ({} sites)",
            field.name,
            field.dimension()
        );

        let start = std::time::Instant::now();
        let mut baseline = Route::random(field, self.config.seed);
        baseline.computation_time = start.elapsed().as_secs_f64();

        let greedy = NearestNeighbor::new().optimize(field)?;
        let genetic = GeneticAlgorithm::new(self.config.clone()).run(field)?;

        self.record(field, &baseline, baseline.length);
        self.record(field, &greedy, baseline.length);
        self.record(field, &genetic, baseline.length);

        Ok(ComparisonRun {
            baseline,
            greedy,
            genetic,
        })
    }

    pub fn results(&self) -> &[OptimizerResult] {
        &self.results
    }

    /// Export all recorded results to a CSV file.
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()
    }

    /// Generate a human-readable comparison report.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========== Route Optimization Summary ==========\n");
        report.push_str(&format!(
            "{:<20} {:>10} {:>12} {:>12}\n",
            "Algorithm", "Length", "Improvement", "Time (s)"
        ));
        report.push_str(&format!("{}\n", "-".repeat(58)));

        for result in &self.results {
            report.push_str(&format!(
                "{:<20} {:>10.2} {:>11.2}% {:>12.4}\n",
                result.algorithm, result.length, result.improvement_over_random, result.time
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_percentages() {
        assert!((Comparison::improvement(100.0, 60.0) - 40.0).abs() < 1e-10);
        assert!((Comparison::improvement(50.0, 50.0)).abs() < 1e-10);
        // Worse than baseline is negative.
        assert!(Comparison::improvement(50.0, 75.0) < 0.0);
        // Degenerate zero-length baseline.
        assert_eq!(Comparison::improvement(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_comparison_run() {
        let field = SensorField::generate("bench", 20, 8);
        let config = GaConfig {
            population_size: 40,
            generations: 60,
            mutation_rate: 0.02,
            seed: 8,
        };

        let mut comparison = Comparison::new(config);
        let run = comparison.run(&field).unwrap();

        assert!(run.baseline.is_complete(&field));
        assert!(run.greedy.is_complete(&field));
        assert!(run.genetic.is_complete(&field));

        // Greedy construction beats a random shuffle on a spread-out field.
        assert!(run.greedy.length <= run.baseline.length);

        let results = comparison.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].improvement_over_random, 0.0);
        for result in results {
            assert_eq!(result.dimension, 20);
            assert!(result.length >= 0.0);
        }
    }

    #[test]
    fn test_report_lists_all_algorithms() {
        let field = SensorField::generate("bench", 10, 3);
        let config = GaConfig {
            population_size: 20,
            generations: 10,
            ..Default::default()
        };

        let mut comparison = Comparison::new(config);
        comparison.run(&field).unwrap();

        let report = comparison.generate_report();
        assert!(report.contains("Random"));
        assert!(report.contains("NearestNeighbor"));
        assert!(report.contains("GeneticAlgorithm"));
    }
}
