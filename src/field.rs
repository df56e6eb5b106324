//! Sensor field model: coordinates and distance computations.
//!
//! A field is the fixed set of sensor sites the collection agent must visit.
//! Coordinates are created once at setup and are read-only for the entire
//! run; the node index into the coordinate list is the identifier used by
//! every optimizer.

use crate::error::PlannerError;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An immutable (x, y) position of a sensor site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// Euclidean distance to another coordinate.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A complete sensor field instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorField {
    /// Name of the field
    pub name: String,
    /// Sensor coordinates, indexed 0..N-1
    pub coordinates: Vec<Coordinate>,
    /// Precomputed distance matrix
    #[serde(skip)]
    distance_matrix: Vec<Vec<f64>>,
}

impl SensorField {
    /// Create a field from a list of coordinates.
    ///
    /// Non-finite coordinate values are rejected; an empty list is accepted
    /// (the degenerate case is handled by the optimizers' own boundaries).
    pub fn new(name: &str, coordinates: Vec<Coordinate>) -> Result<Self, PlannerError> {
        for (i, c) in coordinates.iter().enumerate() {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(PlannerError::InvalidInput(format!(
                    "coordinate {} is not finite: ({}, {})",
                    i, c.x, c.y
                )));
            }
        }

        let distance_matrix = Self::compute_distance_matrix(&coordinates);

        Ok(SensorField {
            name: name.to_string(),
            coordinates,
            distance_matrix,
        })
    }

    /// Generate a field of `num_sensors` sites placed uniformly in [0,100]x[0,100].
    pub fn generate(name: &str, num_sensors: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let coordinates = (0..num_sensors)
            .map(|_| Coordinate::new(rng.gen_range(0.0..=100.0), rng.gen_range(0.0..=100.0)))
            .collect();

        // Generated values are always finite, construction cannot fail.
        SensorField::new(name, coordinates).expect("generated coordinates are finite")
    }

    /// Load a field from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let data = fs::read_to_string(&path)
            .map_err(|e| PlannerError::InvalidInput(format!("cannot read file: {}", e)))?;

        let parsed: SensorField = serde_json::from_str(&data)
            .map_err(|e| PlannerError::InvalidInput(format!("cannot parse field: {}", e)))?;

        // The distance matrix is skipped by serde and must be rebuilt;
        // re-run construction so finiteness is checked as well.
        SensorField::new(&parsed.name, parsed.coordinates)
    }

    /// Save the field to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::InvalidInput(format!("cannot serialize field: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| PlannerError::InvalidInput(format!("cannot write file: {}", e)))
    }

    /// Compute the full Euclidean distance matrix.
    fn compute_distance_matrix(coordinates: &[Coordinate]) -> Vec<Vec<f64>> {
        let n = coordinates.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = coordinates[i].distance_to(&coordinates[j]);
                }
            }
        }

        matrix
    }

    /// Number of sensor sites.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Distance between two sites.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance_matrix[i][j]
    }

    /// Total length of a closed tour: consecutive edges plus the wrap-around
    /// edge from the last site back to the first. Tours with fewer than two
    /// sites have no edges and length 0.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        for i in 0..tour.len() - 1 {
            length += self.distance(tour[i], tour[i + 1]);
        }

        length += self.distance(tour[tour.len() - 1], tour[0]);

        length
    }

    /// Get statistics about the field.
    pub fn statistics(&self) -> FieldStatistics {
        let mut distances: Vec<f64> = Vec::new();
        for i in 0..self.dimension() {
            for j in i + 1..self.dimension() {
                distances.push(self.distance(i, j));
            }
        }

        let avg_distance = if distances.is_empty() {
            0.0
        } else {
            distances.iter().sum::<f64>() / distances.len() as f64
        };
        let max_distance = distances.iter().cloned().fold(0.0, f64::max);

        FieldStatistics {
            name: self.name.clone(),
            dimension: self.dimension(),
            avg_distance,
            max_distance,
        }
    }
}

/// Statistics about a sensor field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldStatistics {
    pub name: String,
    pub dimension: usize,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for FieldStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Field: {}", self.name)?;
        writeln!(f, "  Sensors: {}", self.dimension)?;
        writeln!(f, "  Avg pairwise distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max pairwise distance: {:.2}", self.max_distance)
    }
}
