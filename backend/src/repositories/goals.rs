//! Goals repository for database operations
//!
//! Goals are append-only. The newest row for a user is the active goal and
//! older rows are kept as history.

use super::{decimal_to_f64, f64_to_decimal};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::{Goal, GoalDirection, NewGoal};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub target_weight_kg: Decimal,
    pub direction: String,
    pub weekly_rate_kg: Decimal,
    pub duration_weeks: i32,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal {
            id: record.id,
            user_id: record.user_id,
            goal_type: record.goal_type,
            target_weight_kg: decimal_to_f64(&record.target_weight_kg),
            direction: GoalDirection::from_stored(&record.direction),
            weekly_rate_kg: decimal_to_f64(&record.weekly_rate_kg),
            duration_weeks: record.duration_weeks,
            start_date: record.start_date,
            created_at: record.created_at,
        }
    }
}

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Append a weight goal
    pub async fn create(pool: &PgPool, input: &NewGoal) -> Result<GoalRecord> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO goals (
                user_id, goal_type, target_weight_kg, direction,
                weekly_rate_kg, duration_weeks, start_date
            )
            VALUES ($1, 'weight', $2, $3, $4, $5, $6)
            RETURNING id, user_id, goal_type, target_weight_kg, direction,
                      weekly_rate_kg, duration_weeks, start_date, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(f64_to_decimal(input.target_weight_kg, 2)?)
        .bind(input.direction.as_str())
        .bind(f64_to_decimal(input.weekly_rate_kg, 2)?)
        .bind(input.duration_weeks)
        .bind(input.start_date)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Most recently created goal
    pub async fn latest(pool: &PgPool, user_id: Uuid) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, goal_type, target_weight_kg, direction,
                   weekly_rate_kg, duration_weeks, start_date, created_at
            FROM goals
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
