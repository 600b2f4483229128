//! Nutrition Tracker Shared Library
//!
//! Pure domain code shared by the backend service and the WASM bindings:
//! the energy formulas, daily log aggregation, goal safety checks and the
//! API types built on them.

pub mod aggregation;
pub mod errors;
pub mod goals;
pub mod metrics;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use goals::{plan_weight_goal, GoalPlan, GoalProposal};
pub use metrics::*;
pub use models::*;
pub use types::*;
pub use units::WeightUnit;
