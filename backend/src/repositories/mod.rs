//! Database repositories
//!
//! One repository per table group, plus the `MetricsStore` seam the services
//! are written against.

pub mod exercise;
pub mod goals;
pub mod hydration;
pub mod memory;
pub mod nutrition;
pub mod store;
pub mod user;
pub mod weight;

pub use exercise::{ExerciseLogRecord, ExerciseRepository};
pub use goals::{GoalRecord, GoalRepository};
pub use hydration::{HydrationRepository, WaterLogRecord};
pub use memory::InMemoryStore;
pub use nutrition::{CreateFoodItem, MealEntryRecord, NutritionRepository};
pub use store::{MetricsStore, PgMetricsStore};
pub use user::{ProfileRecord, UserRepository, UserSettingsRecord};
pub use weight::{WeightLogRecord, WeightRepository};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// NUMERIC column value with `dp` decimal places
pub(crate) fn f64_to_decimal(value: f64, dp: u32) -> anyhow::Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| anyhow::anyhow!("{} cannot be stored as a decimal", value))
}
