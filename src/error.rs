//! Error types for the route planner.
//!
//! All errors are caller-input problems surfaced at the boundary of each
//! public operation; there is no transient or retryable failure class.

use std::fmt;

/// Errors produced by the planner's public operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Empty coordinate set or configuration values outside documented bounds.
    InvalidInput(String),
    /// Coincident coordinates or N <= 1 where a non-degenerate tour is required.
    DegenerateGeometry(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            PlannerError::DegenerateGeometry(msg) => write!(f, "degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}
