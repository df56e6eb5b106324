//! Greedy nearest-neighbor construction.
//!
//! Builds one tour by repeatedly visiting the nearest unvisited site. O(N^2)
//! by construction, which is fine at the target scale of tens of sensors; a
//! spatial index would replace the linear scan for thousands of sites.

use crate::error::PlannerError;
use crate::field::SensorField;
use crate::heuristics::RouteOptimizer;
use crate::route::Route;

/// Nearest-neighbor heuristic starting from site 0.
///
/// Fully deterministic: ties are broken by the first site encountered in
/// index scan order, so repeated runs on the same field produce an
/// identical route.
pub struct NearestNeighbor;

impl NearestNeighbor {
    pub fn new() -> Self {
        NearestNeighbor
    }

    /// Find the unvisited site closest to `current`. Strictly-less
    /// comparison keeps the first-encountered site on ties.
    fn find_nearest(&self, field: &SensorField, current: usize, visited: &[bool]) -> Option<usize> {
        let mut nearest = None;
        let mut min_distance = f64::INFINITY;

        for site in 0..field.dimension() {
            if visited[site] {
                continue;
            }
            let dist = field.distance(current, site);
            if dist < min_distance {
                min_distance = dist;
                nearest = Some(site);
            }
        }

        nearest
    }
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteOptimizer for NearestNeighbor {
    fn optimize(&self, field: &SensorField) -> Result<Route, PlannerError> {
        let start = std::time::Instant::now();
        let n = field.dimension();

        // Degenerate fields produce the trivial route, no error.
        if n < 2 {
            let tour: Vec<usize> = (0..n).collect();
            return Ok(Route::from_tour(field, tour, self.name()));
        }

        let mut tour = vec![0];
        let mut visited = vec![false; n];
        visited[0] = true;

        let mut current = 0;

        while tour.len() < n {
            match self.find_nearest(field, current, &visited) {
                Some(next) => {
                    tour.push(next);
                    visited[next] = true;
                    current = next;
                }
                None => break,
            }
        }

        let mut route = Route::from_tour(field, tour, self.name());
        route.computation_time = start.elapsed().as_secs_f64();
        Ok(route)
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}
