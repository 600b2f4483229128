//! Business logic services
//!
//! Services are written against the `MetricsStore` trait so they run the
//! same over PostgreSQL and the in-memory store.

pub mod goals;
pub mod metrics;

pub use goals::{CreateGoalInput, GoalValidator};
pub use metrics::{MetricsEngine, MetricsInput};
