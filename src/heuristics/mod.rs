//! Route optimizers for the sensor collection tour.
//!
//! This module exports the greedy construction heuristic and the genetic
//! algorithm metaheuristic.

pub mod genetic;
pub mod greedy;

pub use genetic::*;
pub use greedy::*;

use crate::error::PlannerError;
use crate::field::SensorField;
use crate::route::Route;

/// A tour optimizer: consumes a read-only field, produces a closed route
/// visiting every site exactly once.
pub trait RouteOptimizer {
    fn optimize(&self, field: &SensorField) -> Result<Route, PlannerError>;
    fn name(&self) -> &str;
}
