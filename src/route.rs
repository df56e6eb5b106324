//! Route representation for the sensor collection tour.
//!
//! A route is an ordered visiting sequence of all sensor sites, each visited
//! exactly once; the tour is implicitly closed (the last site connects back
//! to the first).

use crate::field::SensorField;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A candidate tour together with its evaluation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// The tour as a sequence of site indices
    pub tour: Vec<usize>,
    /// Total closed-tour length
    pub length: f64,
    /// Algorithm that produced this route
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of iterations (if applicable)
    pub iterations: Option<usize>,
}

impl Route {
    /// Create a route from a tour, computing its length against the field.
    ///
    /// A tour referencing a site outside the field cannot be measured; its
    /// length is reported as infinite and `is_complete` returns false. The
    /// optimizers never build such tours, this only guards caller input.
    pub fn from_tour(field: &SensorField, tour: Vec<usize>, algorithm: &str) -> Self {
        let in_bounds = tour.iter().all(|&site| site < field.dimension());
        let length = if in_bounds {
            field.tour_length(&tour)
        } else {
            f64::INFINITY
        };

        Route {
            tour,
            length,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Create a uniformly shuffled route over all sites. Used as the random
    /// baseline by the optimization driver.
    pub fn random(field: &SensorField, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut tour: Vec<usize> = (0..field.dimension()).collect();
        tour.shuffle(&mut rng);
        Route::from_tour(field, tour, "Random")
    }

    /// Check that the tour visits every site exactly once.
    pub fn is_complete(&self, field: &SensorField) -> bool {
        if self.tour.len() != field.dimension() {
            return false;
        }

        let mut seen = vec![false; field.dimension()];
        for &site in &self.tour {
            if site >= field.dimension() || seen[site] {
                return false;
            }
            seen[site] = true;
        }

        true
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Route ({})", self.algorithm)?;
        writeln!(f, "  Length: {:.2}", self.length)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {}", iter)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}
